/**
 * User Service Routes
 *
 * # Routes
 *
 * - `GET /` - Greeting
 * - `POST /users` - User registration
 * - `POST /sessions` - Login, sets the `session_id` cookie
 * - `DELETE /sessions` - Logout, redirects to `/`
 * - `GET /profile` - Email of the logged-in user
 * - `POST /reset_password` - Issue a reset token
 * - `PUT /reset_password` - Consume a reset token
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{
    get_reset_password_token, index, login, logout, profile, register, update_password,
};
use crate::backend::server::state::AppState;

/// Configure user service routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with user service routes configured
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(index))
        .route("/users", post(register))
        .route("/sessions", post(login).delete(logout))
        .route("/profile", get(profile))
        .route(
            "/reset_password",
            post(get_reset_password_token).put(update_password),
        )
}
