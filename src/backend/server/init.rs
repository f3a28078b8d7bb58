/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to SQLite and run migrations
 * 2. Build the session registry for the configured policy
 * 3. Create the state and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
pub async fn create_app(config: AppConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing authkeep backend server");

    let pool = load_database(&config).await?;
    let app_state = AppState::new(config, pool);

    tracing::info!("Backend initialized");
    Ok(create_router(app_state))
}
