//! Authentication Module
//!
//! This module handles user registration, credential checks, session
//! management and password resets, and the HTTP handlers exposing them.
//!
//! # Architecture
//!
//! - **`credentials`** - bcrypt hashing and verification
//! - **`users`** - User data model and database operations
//! - **`service`** - `AuthService`, the façade handlers talk to
//! - **`cookies`** - Session cookie parsing and building
//! - **`handlers`** - HTTP handlers
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── credentials.rs  - Password hashing
//! ├── users.rs        - User model and database operations
//! ├── service.rs      - AuthService
//! ├── cookies.rs      - Session cookies
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Sessions live in the session registry; the cookie only carries an id
//! - Invalid credentials return 401 without saying which part was wrong

/// Password hashing
pub mod credentials;

/// User data model and database operations
pub mod users;

/// Authentication façade
pub mod service;

/// Session cookies
pub mod cookies;

/// HTTP handlers
pub mod handlers;

// Re-export commonly used types
pub use credentials::CredentialHasher;
pub use service::AuthService;
pub use users::User;
