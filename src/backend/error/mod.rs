//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in the auth service and HTTP handlers and can be
//! converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, producing the status from
//! `BackendError::status_code` and a `{"error": ...}` JSON body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
