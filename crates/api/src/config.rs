use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// A configuration value could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Interval between WebSocket heartbeat pings (default: `30`).
    pub ws_heartbeat_secs: u64,
    /// Require a readable document before a relay join is accepted.
    pub relay_require_read_access: bool,
    /// PostgreSQL URL. `None` selects the in-memory document store.
    pub database_url: Option<String>,
    /// Maximum pool size (default: `20`).
    pub database_max_connections: u32,
    /// JWT validation configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `WS_HEARTBEAT_SECS`         | `30`                    |
    /// | `RELAY_REQUIRE_READ_ACCESS` | `false`                 |
    /// | `DATABASE_URL`              | unset (in-memory store) |
    /// | `DATABASE_MAX_CONNECTIONS`  | `20`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", 3000)?;

        let cors_origins = split_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30)?;
        let ws_heartbeat_secs = parse_var("WS_HEARTBEAT_SECS", 30)?;
        let relay_require_read_access = parse_var("RELAY_REQUIRE_READ_ACCESS", false)?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 20)?;

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            ws_heartbeat_secs,
            relay_require_read_access,
            database_url,
            database_max_connections,
            jwt,
        })
    }
}

/// Parse an optional env var, falling back to `default` when unset.
pub(crate) fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
