use std::io;

use ai_dev_team_api::config::AppConfig;
use ai_dev_team_api::lifecycle::{self, ProcessLifecycle};
use ai_dev_team_api::openapi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AI Dev Team API Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - Health check and service identity endpoints
/// - Swagger UI over the OpenAPI document loaded at startup
/// - Environment configuration via `.env` file
/// - Graceful shutdown on SIGINT/SIGTERM with bounded drain
///
/// # Endpoints
/// - Identity: `GET /`
/// - Health check: `GET /api/health`
/// - Swagger UI: `/api-docs/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - Server binds to port `PORT` (default 3000)
/// - `APP_ENV` (default "development") gates diagnostic error details
/// - Environment variables loaded from `.env` file (if present)
///
/// # Exit codes
/// - `0` after a graceful shutdown
/// - `1` on invalid configuration, bind failure, socket-close error, or an
///   escaped panic
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    lifecycle::install_crash_handler();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, err));
        }
    };

    // Load the API description once, before the socket starts accepting.
    // Failure degrades the documentation route, nothing else.
    let document = match openapi::load_document(&config.openapi_path) {
        Ok(document) => Some(document),
        Err(err) => {
            tracing::warn!(error = %err, "Could not load OpenAPI specification");
            None
        }
    };

    ProcessLifecycle::bind(config, document)?.run().await
}
