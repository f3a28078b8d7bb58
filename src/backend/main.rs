/**
 * authkeep Server Entry Point
 *
 * Loads configuration from the environment (and `.env` if present),
 * installs a redacting tracing subscriber and serves the router.
 */

use authkeep::shared::redaction::{RedactingFormatter, PII_FIELDS};
use authkeep::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .event_format(RedactingFormatter::new(
            tracing_subscriber::fmt::format(),
            &PII_FIELDS,
        ))
        .init();

    let config = AppConfig::from_env()?;
    let port = config.port;

    let app = authkeep::backend::server::init::create_app(config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
