//! Shared Error Types
//!
//! Input errors raised before any storage or session work happens. The
//! backend wraps them in `BackendError`, which answers 400 with the error's
//! text as the body.
//!
//! ```rust
//! use authkeep::shared::error::{required, SharedError};
//!
//! let password: Option<String> = Some(String::new());
//! let err = required(&password, "password").unwrap_err();
//! assert_eq!(err.to_string(), "password missing");
//! assert!(matches!(err, SharedError::MissingField { field: "password" }));
//! ```
use thiserror::Error;

/// Form input that cannot be acted on
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A required field is absent or empty
    #[error("{field} missing")]
    MissingField { field: &'static str },
}

impl SharedError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

/// Value of a required form field; empty counts as absent
pub fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, SharedError> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(SharedError::missing(field))
}
