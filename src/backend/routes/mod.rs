//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── user_routes.rs  - User service routes
//! └── api_routes.rs   - Session API routes (/api/v1)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use authkeep::backend::routes::create_router;
//! use authkeep::backend::server::state::AppState;
//! use authkeep::shared::AppConfig;
//!
//! # async fn example(pool: sqlx::SqlitePool) {
//! let router = create_router(AppState::new(AppConfig::default(), pool));
//! # }
//! ```

/// Main router creation
pub mod router;

/// User service routes
pub mod user_routes;

/// Session API routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
