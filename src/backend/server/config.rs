/**
 * Server Configuration
 *
 * This module opens the SQLite database that backs the user store and the
 * persisted session store, and brings its schema up to date.
 *
 * # Configuration Sources
 *
 * The URL comes from `AppConfig::database_url` (`DATABASE_URL`). In-memory
 * URLs get a single long-lived connection, since every SQLite in-memory
 * connection is its own database.
 *
 * # Error Handling
 *
 * Unlike optional integrations, the database is required: connection and
 * migration failures are returned to the caller and stop startup.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::config::AppConfig;

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Connect to `url` and run the embedded migrations.
///
/// # Example
///
/// ```rust,no_run
/// use authkeep::backend::server::config::connect_database;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = connect_database("sqlite::memory:").await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect_database(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Load the database described by the application configuration.
///
/// Logs each step the way the rest of the server does and hands any error
/// back to `main`.
pub async fn load_database(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = connect_database(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to open database: {:?}", e);
        e
    })?;

    tracing::info!("Database ready, migrations applied");
    Ok(pool)
}
