//! Server settings read from the process environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset (no CORS layer), comma-separated |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |
//! | `API_MAX_UPLOAD_BYTES` | 10 MiB |

use std::{env, str::FromStr};

use eyre::{Result, WrapErr};
use tracing::Level;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the VisitDay API server
///
/// ```no_run
/// use visitday_api::config::ApiConfig;
///
/// let config = ApiConfig::from_env().expect("DATABASE_URL must be set");
/// println!("Starting server on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: Level,
    /// `None` leaves CORS unconfigured
    pub cors_origins: Option<Vec<String>>,
    /// Seconds before a request is answered with 408
    pub request_timeout: u64,
    /// Largest request body accepted, which bounds spreadsheet uploads
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Reads the configuration, failing when `DATABASE_URL` is missing or
    /// `API_PORT` is not a port number. Other malformed values fall back to
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("API_PORT") {
            Ok(value) => value.parse().wrap_err("Invalid API_PORT value")?,
            Err(_) => 3000,
        };

        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_url: env::var("DATABASE_URL")
                .wrap_err("DATABASE_URL environment variable must be set")?,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
            log_level: env::var("LOG_LEVEL")
                .map(|value| parse_log_level(&value))
                .unwrap_or(Level::INFO),
            cors_origins: env::var("API_CORS_ORIGINS").ok().map(|origins| split_origins(&origins)),
            request_timeout: env_or("API_REQUEST_TIMEOUT_SECONDS", 30),
            max_upload_bytes: env_or("API_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn split_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    Level::from_str(value.trim()).unwrap_or(Level::INFO)
}
