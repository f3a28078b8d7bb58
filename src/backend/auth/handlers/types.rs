/**
 * Authentication Handler Types
 *
 * This module defines the form bodies and JSON responses used by the user
 * service and session API handlers. Form fields are optional so a missing
 * field can be answered with the status each route documents instead of a
 * generic extractor rejection.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Email and password form, used by registration and both logins
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsForm {
    /// Both fields, if both are present and non-empty
    pub fn complete(&self) -> Option<(&str, &str)> {
        let email = non_empty(&self.email)?;
        let password = non_empty(&self.password)?;
        Some((email, password))
    }
}

/// Reset token request form
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ResetRequestForm {
    pub email: Option<String>,
}

/// Password update form
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PasswordUpdateForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

/// `{email, message}` response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub email: String,
    pub message: String,
}

impl EmailMessage {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
        }
    }
}

/// `{email}` response for the profile route
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileResponse {
    pub email: String,
}

/// `{email, reset_token}` response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

/// User response (without sensitive data)
///
/// Does not include the password hash, the session reference or the reset
/// token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Field value, treating an empty string like a missing field
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
