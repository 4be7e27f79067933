//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Durable store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://users.db?mode=rwc".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

/// Memory cache configuration.
///
/// With no `url` the cache lives in process memory and is lost on restart.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis URL for a shared cache
    pub url: Option<String>,
}

/// HTTP client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpClientConfig {
    /// Base URL of the remote API (e.g., "https://jsonplaceholder.typicode.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl HttpClientConfig {
    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            request_timeout_ms: 10000,
        }
    }
}
