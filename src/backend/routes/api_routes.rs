/**
 * Session API Routes
 *
 * Routes nested under `/api/v1`. The request gate is layered over this
 * router in `router.rs`, so every path here except the excluded ones needs
 * credentials when `AUTH_TYPE` is set.
 *
 * # Routes
 *
 * - `GET /status` - Liveness
 * - `GET /unauthorized` - Always 401
 * - `GET /forbidden` - Always 403
 * - `POST /auth_session/login` - Start a session
 * - `DELETE /auth_session/logout` - End a session
 * - `GET /users/me` - Authenticated user
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::handlers::session_api::{
    forbidden, session_login, session_logout, status, unauthorized, users_me,
};
use crate::backend::server::state::AppState;

/// Configure session API routes
///
/// Paths are relative; the caller nests the result under `/api/v1`.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/status", get(status))
        .route("/unauthorized", get(unauthorized))
        .route("/forbidden", get(forbidden))
        .route("/auth_session/login", post(session_login))
        .route("/auth_session/logout", delete(session_logout))
        .route("/users/me", get(users_me))
}
