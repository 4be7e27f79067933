//! User service configuration.

use std::env;

use common::{CacheConfig, DatabaseConfig, HttpClientConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Durable store connection settings
    pub database: DatabaseConfig,
    /// Memory cache settings
    pub cache: CacheConfig,
    /// Remote users API settings
    pub remote: HttpClientConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: defaults.database.min_connections,
            },
            cache: CacheConfig {
                url: env::var("CACHE_URL").ok().filter(|url| !url.is_empty()),
            },
            remote: HttpClientConfig {
                base_url: env::var("USERS_API_BASE_URL").unwrap_or(defaults.remote.base_url),
                request_timeout_ms: env::var("USERS_API_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.remote.request_timeout_ms),
            },
        }
    }
}
