use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

/// Port the server binds when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment name assumed when `APP_ENV` is not set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Location of the OpenAPI description when `OPENAPI_PATH` is not set.
pub const DEFAULT_OPENAPI_PATH: &str = "openapi.json";

/// Seconds in-flight requests may drain during shutdown before the
/// remaining connections are dropped.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size (JSON and URL-encoded), 10 MiB.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// # Application Configuration
///
/// Runtime settings collected from the environment at startup, after any
/// `.env` file has been loaded.
///
/// ## Variables
/// - `PORT`: listening port (default 3000)
/// - `APP_ENV`: environment name (default "development"); the development
///   environment exposes diagnostic `details` in error responses
/// - `OPENAPI_PATH`: path to the OpenAPI description document
/// - `SHUTDOWN_TIMEOUT_SECS`: graceful-shutdown drain bound in seconds
///
/// Numeric variables are parsed strictly: a value that does not parse is a
/// startup error, never a silently propagated default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    pub openapi_path: PathBuf,
    pub shutdown_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid SHUTDOWN_TIMEOUT_SECS value {value:?}: {source}")]
    InvalidShutdownTimeout {
        value: String,
        source: ParseIntError,
    },
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("PORT").ok(),
            env::var("APP_ENV").ok(),
            env::var("OPENAPI_PATH").ok(),
            env::var("SHUTDOWN_TIMEOUT_SECS").ok(),
        )
    }

    fn from_values(
        port: Option<String>,
        environment: Option<String>,
        openapi_path: Option<String>,
        shutdown_timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw.parse().map_err(|source| ConfigError::InvalidPort {
                value: raw,
                source,
            })?,
            None => DEFAULT_PORT,
        };

        let shutdown_timeout_secs = match shutdown_timeout_secs {
            Some(raw) => {
                raw.parse()
                    .map_err(|source| ConfigError::InvalidShutdownTimeout {
                        value: raw,
                        source,
                    })?
            }
            None => DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            environment: environment.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            openapi_path: openapi_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OPENAPI_PATH)),
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
        })
    }

    /// Whether diagnostic error details may be exposed to clients.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
