//! Storefront server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storefront server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Directory served under `/static`
    pub public_dir: String,
    /// Upper bound on pooled store connections
    pub db_max_connections: u32,
    /// How long a request waits for a pooled connection before failing
    pub db_acquire_timeout: Duration,
    /// Whole-request deadline
    pub request_timeout: Duration,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines (production)
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: parse_or("HTTP_PORT", 3000)?,
            log_json: parse_or("LOG_JSON", environment == "production")?,
            environment,
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 30)?),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        })
    }
}

/// Parse an optional env var, falling back to `default` when unset.
///
/// A set-but-malformed value is an error rather than a silent default.
fn parse_or<T>(name: &str, default: T) -> Result<T, BoxError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid {name} value {raw:?}: {e}").into()),
        _ => Ok(default),
    }
}
