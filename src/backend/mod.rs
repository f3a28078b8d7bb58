//! Backend Module
//!
//! This module contains all server-side code for authkeep: an Axum HTTP
//! server for user registration, login, logout and password reset, and a
//! session API guarded by a configurable request gate.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credentials, users, the auth service and handlers
//! - **`sessions`** - Session registry, stores and clocks
//! - **`middleware`** - Request gate
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── sessions/       - Session registry
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error maps itself to a
//! status code and a JSON body. Storage faults become 500s.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Session registry
pub mod sessions;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
