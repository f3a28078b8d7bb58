/**
 * Session Handlers
 *
 * Login and logout for the user service:
 *
 * - `POST /sessions` - verify credentials, start a session, set the cookie
 * - `DELETE /sessions` - end the session named by the cookie, redirect to `/`
 *
 * The cookie is always named `session_id` on these routes.
 */
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Json, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::{read_cookie, session_cookie, SESSION_COOKIE};
use crate::backend::auth::handlers::types::{CredentialsForm, EmailMessage};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing fields, unknown email or wrong password
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Set-Cookie: session_id=163fe508-19a2-48ed-a7c8-d9c6e56fabd1; HttpOnly; Path=/
///
/// {"email": "bob@bob.com", "message": "logged in"}
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    jar: CookieJar,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, BackendError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!("Rejected login body: {}", e);
        BackendError::InvalidCredential
    })?;

    let (email, password) = form.complete().ok_or(BackendError::InvalidCredential)?;

    if !auth.valid_login(email, password).await? {
        tracing::warn!("Invalid login: email={};", email);
        return Err(BackendError::InvalidCredential);
    }

    let session_id = auth
        .create_session(email)
        .await?
        .ok_or(BackendError::InvalidCredential)?;

    tracing::info!("User logged in: email={};", email);

    Ok((
        jar.add(session_cookie(SESSION_COOKIE, session_id)),
        Json(EmailMessage::new(email, "logged in")),
    )
        .into_response())
}

/// Logout handler
///
/// Ends the cookie's own session as well as the one the user row
/// references, then responds with a plain 302 to `/`.
///
/// # Errors
///
/// * `403 Forbidden` - cookie missing or not naming a live session
pub async fn logout(
    State(auth): State<AuthService>,
    jar: CookieJar,
) -> Result<Response, BackendError> {
    let session_id = read_cookie(&jar, SESSION_COOKIE);

    let user = auth
        .get_user_from_session_id(session_id.as_deref())
        .await?
        .ok_or(BackendError::InvalidOrExpiredSession)?;

    auth.destroy_session_id(session_id.as_deref()).await?;
    auth.destroy_session(user.id).await?;
    tracing::info!("User logged out: email={};", user.email);

    Ok((StatusCode::FOUND, [(LOCATION, "/")]).into_response())
}
