//! authkeep - Main Library
//!
//! A small user-authentication service: registration, login, logout and
//! password reset over HTTP, with server-side sessions and PII redaction in
//! log output.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, log redaction, shared error types
//! - **`backend`** - Axum server, auth service, session registry, gate
//!
//! # Usage
//!
//! ```rust,no_run
//! use authkeep::backend::server::init::create_app;
//! use authkeep::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Session Strategies
//!
//! `AUTH_TYPE` selects how the `/api/v1` gate authenticates and where
//! sessions live. See [`shared::config::AuthType`] and
//! [`backend::sessions`].

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
