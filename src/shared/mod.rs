//! Shared Module
//!
//! This module contains types that do not depend on the HTTP server or the
//! database: configuration, form input errors and log redaction. The backend
//! builds on top of them.

/// Form input errors
pub mod error;

/// Application configuration
pub mod config;

/// PII redaction for log output
pub mod redaction;

/// Re-export commonly used types for convenience
pub use error::{required, SharedError};
pub use config::{AppConfig, AppConfigBuilder, AuthType, ConfigError, SessionPolicy};
pub use redaction::{filter_datum, RedactingFormatter, PII_FIELDS};
