/**
 * Backend Error Types
 *
 * This module defines the errors raised by the auth service, the session
 * registry and the HTTP handlers. Every variant maps to one HTTP status.
 *
 * # Error Categories
 *
 * ## Domain Errors
 *
 * Expected outcomes of bad input, recovered at the handler boundary:
 * - `DuplicateIdentity` - email already registered (400)
 * - `UnknownIdentity` - no user with this email (403)
 * - `InvalidCredential` - wrong email/password pair (401)
 * - `InvalidOrExpiredSession` - cookie does not resolve to a user (403)
 * - `InvalidResetToken` - reset token unknown or already used (403)
 * - `SharedError` - required form field missing (400)
 *
 * ## Infrastructure Errors
 *
 * Faults the request cannot recover from (500):
 * - `Database` - sqlx errors
 * - `Hashing` - bcrypt errors
 * - `Session` - session store errors
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::sessions::SessionError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use authkeep::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "no user found for this email");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// assert_eq!(BackendError::InvalidResetToken.status_code(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A user with this email already exists
    #[error("email already registered")]
    DuplicateIdentity,

    /// No user matches the given email
    #[error("no user found for this email")]
    UnknownIdentity,

    /// Email/password pair does not verify
    #[error("invalid credentials")]
    InvalidCredential,

    /// Session id is missing, unknown or expired
    #[error("invalid or expired session")]
    InvalidOrExpiredSession,

    /// Reset token is malformed, unknown or already consumed
    #[error("invalid reset token")]
    InvalidResetToken,

    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Session registry error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Password hashing or verification error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Missing or empty form field
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateIdentity => StatusCode::BAD_REQUEST,
            Self::UnknownIdentity => StatusCode::FORBIDDEN,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::InvalidOrExpiredSession => StatusCode::FORBIDDEN,
            Self::InvalidResetToken => StatusCode::FORBIDDEN,
            Self::HandlerError { status, .. } => *status,
            Self::Session(SessionError::InvalidIdentity) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to return to a client.
    ///
    /// Server-side faults are reported generically; their details only go to
    /// the log.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return "Internal Server Error".to_string();
        }
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
