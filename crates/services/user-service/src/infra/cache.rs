//! Memory cache tier.
//!
//! Stores JSON-encoded values under string keys. Entries never expire; they
//! are only replaced by a later write.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache key under which the whole user collection is stored
pub const CACHE_KEY_USER_LIST: &str = "user:list";

/// Key/value cache consulted before the durable store.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemoryCache: Send + Sync {
    /// Read the raw value stored under `key`
    async fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn write(&self, key: &str, value: String) -> AppResult<()>;
}

// =============================================================================
// In-process Cache
// =============================================================================

/// Process-lifetime cache. Cleared when the process exits.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryCache for InMemoryCache {
    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// Redis Cache
// =============================================================================

/// Redis-backed cache shared between processes.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl MemoryCache for RedisCache {
    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(|e| {
            warn!("Redis get error for key {}: {}", key, e);
            AppError::from(e)
        })
    }

    async fn write(&self, key: &str, value: String) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            warn!("Redis set error for key {}: {}", key, e);
            AppError::from(e)
        })
    }
}
