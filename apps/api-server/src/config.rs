//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use forum_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_or(
                    env::var("DB_MAX_CONNECTIONS").ok(),
                    defaults.max_connections,
                ),
                min_connections: parse_or(
                    env::var("DB_MIN_CONNECTIONS").ok(),
                    defaults.min_connections,
                ),
                connect_timeout: Duration::from_secs(parse_or(
                    env::var("DB_CONNECT_TIMEOUT_SECS").ok(),
                    defaults.connect_timeout.as_secs(),
                )),
                acquire_timeout: Duration::from_secs(parse_or(
                    env::var("DB_ACQUIRE_TIMEOUT_SECS").ok(),
                    defaults.acquire_timeout.as_secs(),
                )),
                ..defaults
            }
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or(env::var("PORT").ok(), 8080),
            database,
        }
    }
}

/// Parse an optional raw value, falling back to `default` when it is
/// missing or malformed.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
