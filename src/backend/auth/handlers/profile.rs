/**
 * Profile Handler
 *
 * GET /profile returns the email of the user behind the `session_id`
 * cookie, or 403 when the cookie does not name a live session.
 */
use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::{read_cookie, SESSION_COOKIE};
use crate::backend::auth::handlers::types::ProfileResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

pub async fn profile(
    State(auth): State<AuthService>,
    jar: CookieJar,
) -> Result<Json<ProfileResponse>, BackendError> {
    let session_id = read_cookie(&jar, SESSION_COOKIE);

    let user = auth
        .get_user_from_session_id(session_id.as_deref())
        .await?
        .ok_or(BackendError::InvalidOrExpiredSession)?;

    Ok(Json(ProfileResponse { email: user.email }))
}
