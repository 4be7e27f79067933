//! Infrastructure layer - database, cache and migrations.

pub mod cache;
mod db;
pub mod migrations;

pub use cache::{InMemoryCache, MemoryCache, RedisCache, CACHE_KEY_USER_LIST};
pub use db::Database;
pub use migrations::Migrator;

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockMemoryCache;
