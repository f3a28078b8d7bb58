/**
 * Password Reset Handlers
 *
 * - `POST /reset_password` - issue a reset token for an email
 * - `PUT /reset_password` - consume a token and set a new password
 *
 * A token is valid for exactly one update.
 */
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Json,
    Form,
};

use crate::backend::auth::handlers::types::{
    non_empty, EmailMessage, PasswordUpdateForm, ResetRequestForm, ResetTokenResponse,
};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::error::required;

/// Reset token handler
///
/// # Errors
///
/// * `403 Forbidden` - missing or unknown email
pub async fn get_reset_password_token(
    State(auth): State<AuthService>,
    form: Result<Form<ResetRequestForm>, FormRejection>,
) -> Result<Json<ResetTokenResponse>, BackendError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!("Rejected reset request body: {}", e);
        BackendError::UnknownIdentity
    })?;

    let email = non_empty(&form.email).ok_or(BackendError::UnknownIdentity)?;
    let reset_token = auth.get_reset_password_token(email).await?;
    tracing::info!("Reset token issued: email={};", email);

    Ok(Json(ResetTokenResponse {
        email: email.to_string(),
        reset_token,
    }))
}

/// Password update handler
///
/// # Errors
///
/// * `403 Forbidden` - token missing, not a UUID, unknown or already used
/// * `400 Bad Request` - unparseable body or `new_password` missing
pub async fn update_password(
    State(auth): State<AuthService>,
    form: Result<Form<PasswordUpdateForm>, FormRejection>,
) -> Result<Json<EmailMessage>, BackendError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!("Rejected password update body: {}", e);
        BackendError::handler(StatusCode::BAD_REQUEST, "Bad Request")
    })?;

    let reset_token = non_empty(&form.reset_token).ok_or(BackendError::InvalidResetToken)?;
    if uuid::Uuid::parse_str(reset_token).is_err() {
        return Err(BackendError::InvalidResetToken);
    }
    let new_password = required(&form.new_password, "new_password")?;

    let user = auth.update_password(reset_token, new_password).await?;
    tracing::info!("Password updated: email={};", user.email);

    let email = form.email.unwrap_or(user.email);
    Ok(Json(EmailMessage::new(email, "Password updated")))
}
