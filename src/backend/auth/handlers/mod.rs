//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the user service and the
//! session API. Handlers are organized into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! ├── types.rs        - Form and response types
//! ├── index.rs        - Greeting and 404 fallback
//! ├── register.rs     - POST /users
//! ├── sessions.rs     - POST/DELETE /sessions
//! ├── profile.rs      - GET /profile
//! ├── reset.rs        - POST/PUT /reset_password
//! └── session_api.rs  - /api/v1 routes
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email and password → user created
//! 2. **Login**: credentials verified → session id set as a cookie
//! 3. **Profile**: cookie resolved to a user → email returned
//! 4. **Logout**: session destroyed → redirect to `/`
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session ids are random UUIDs held server-side
//! - Reset tokens are single-use
//!
//! # Example
//!
//! ```rust,no_run
//! use authkeep::backend::auth::handlers::{login, logout, profile, register};
//! use authkeep::backend::server::state::AppState;
//! use axum::{routing::{get, post}, Router};
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/users", post(register))
//!     .route("/sessions", post(login).delete(logout))
//!     .route("/profile", get(profile));
//! ```

/// Form and response types
pub mod types;

/// Greeting and fallback
pub mod index;

/// Registration handler
pub mod register;

/// Login and logout handlers
pub mod sessions;

/// Profile handler
pub mod profile;

/// Password reset handlers
pub mod reset;

/// Session API handlers
pub mod session_api;

// Re-export commonly used types
pub use types::{CredentialsForm, EmailMessage, UserResponse};

// Re-export handlers
pub use index::{index, not_found};
pub use profile::profile;
pub use register::register;
pub use reset::{get_reset_password_token, update_password};
pub use sessions::{login, logout};
