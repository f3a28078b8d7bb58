/**
 * Registration Handler
 *
 * This module implements user registration for POST /users.
 *
 * # Registration Process
 *
 * 1. Read `email` and `password` from the form body
 * 2. Hash the password and insert the user
 * 3. Return the email and a confirmation message
 *
 * # Errors
 *
 * - `400 Bad Request` - unparseable body, missing field, or email taken
 */
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Form,
};

use crate::backend::auth::handlers::types::{CredentialsForm, EmailMessage};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::error::required;

/// Registration handler
///
/// # Example Request
///
/// ```http
/// POST /users HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// email=bob@me.com&password=mySuperPwd
/// ```
///
/// # Example Response
///
/// ```json
/// {"email": "bob@me.com", "message": "user created"}
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, BackendError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!("Rejected registration body: {}", e);
        BackendError::handler(StatusCode::BAD_REQUEST, "Bad Request")
    })?;

    let email = required(&form.email, "email")?;
    let password = required(&form.password, "password")?;

    match auth.register_user(email, password).await {
        Ok(user) => {
            tracing::info!("User created: email={};", user.email);
            Ok(Json(EmailMessage::new(user.email, "user created")).into_response())
        }
        Err(BackendError::DuplicateIdentity) => {
            tracing::info!("Registration refused: email={};", email);
            let body = serde_json::json!({ "message": "email already registered" });
            Ok((StatusCode::BAD_REQUEST, Json(body)).into_response())
        }
        Err(e) => Err(e),
    }
}
