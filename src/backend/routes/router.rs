/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. User service routes (`/`, `/users`, `/sessions`, ...)
 * 2. Session API routes, nested under `/api/v1` behind the request gate
 * 3. Fallback handler (JSON 404)
 */

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::backend::auth::handlers::not_found;
use crate::backend::middleware::gate::gate_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::user_routes::configure_user_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the auth service and gate
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = configure_api_routes(Router::new()).layer(middleware::from_fn_with_state(
        app_state.clone(),
        gate_middleware,
    ));

    let router = configure_user_routes(Router::new())
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    router.with_state(app_state)
}
