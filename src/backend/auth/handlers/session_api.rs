/**
 * Session API Handlers
 *
 * Routes mounted under `/api/v1`, behind the request gate:
 *
 * - `GET /status` - liveness
 * - `GET /unauthorized`, `GET /forbidden` - fixed error responses
 * - `POST /auth_session/login` - start a session, cookie named by `SESSION_NAME`
 * - `DELETE /auth_session/logout` - end the session named by that cookie
 * - `GET /users/me` - the user the gate authenticated
 */
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::backend::auth::cookies::{read_cookie, session_cookie};
use crate::backend::auth::handlers::types::{CredentialsForm, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::gate::CurrentUser;
use crate::backend::server::state::AppState;
use crate::shared::error::{required, SharedError};

/// GET /api/v1/status
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /api/v1/unauthorized
pub async fn unauthorized() -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, "Unauthorized")
}

/// GET /api/v1/forbidden
pub async fn forbidden() -> BackendError {
    BackendError::handler(StatusCode::FORBIDDEN, "Forbidden")
}

/// POST /api/v1/auth_session/login
///
/// Every login gets its own session; earlier sessions of the same user stay
/// live until they are logged out or expire.
///
/// # Errors
///
/// * `400 Bad Request` - `email missing` / `password missing`
/// * `404 Not Found` - `no user found for this email`
/// * `401 Unauthorized` - `wrong password`
pub async fn session_login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, BackendError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!("Rejected session login body: {}", e);
        SharedError::missing("email")
    })?;

    let email = required(&form.email, "email")?;
    let password = required(&form.password, "password")?;

    let user = state
        .auth
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| BackendError::handler(StatusCode::NOT_FOUND, "no user found for this email"))?;

    if !state.auth.check_password(&user, password) {
        tracing::warn!("Wrong password: email={};", email);
        return Err(BackendError::handler(StatusCode::UNAUTHORIZED, "wrong password"));
    }

    let session_id = state.auth.sessions().create(&user.id.to_string()).await?;
    tracing::info!("Session started: email={};", user.email);

    Ok((
        jar.add(session_cookie(state.config.session_name.clone(), session_id)),
        Json(UserResponse::from(&user)),
    )
        .into_response())
}

/// DELETE /api/v1/auth_session/logout
///
/// # Errors
///
/// * `404 Not Found` - the cookie does not name a stored session
pub async fn session_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Value>, BackendError> {
    let session_id = read_cookie(&jar, &state.config.session_name);

    if !state.auth.destroy_session_id(session_id.as_deref()).await? {
        return Err(BackendError::handler(StatusCode::NOT_FOUND, "Not found"));
    }

    Ok(Json(json!({})))
}

/// GET /api/v1/users/me
///
/// # Errors
///
/// * `404 Not Found` - no user was authenticated for this request
pub async fn users_me(
    current_user: Option<Extension<CurrentUser>>,
) -> Result<Json<UserResponse>, BackendError> {
    let Extension(CurrentUser(user)) =
        current_user.ok_or_else(|| BackendError::handler(StatusCode::NOT_FOUND, "Not found"))?;

    Ok(Json(UserResponse::from(&user)))
}
