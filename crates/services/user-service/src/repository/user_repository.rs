//! Tiered read path over memory cache, durable store and remote source.
//!
//! `refresh` walks a fixed ladder and the first tier that yields a non-empty
//! collection wins:
//!
//! 1. memory cache
//! 2. durable store (the cache is not written back from here)
//! 3. remote source, whose result replaces both the durable store and the
//!    cache; on failure the durable store is read once more as a stale
//!    fallback
//!
//! Cache and store errors count as "no data" and are only logged. The one
//! error surfaced is [`AppError::NoDataAvailable`], when the remote fetch
//! failed and nothing is stored locally.
//!
//! Concurrent calls are independent ladder walks. When two of them reach the
//! remote tier, their writes are not coordinated and the last one wins.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::User;

use crate::client::RemoteSource;
use crate::infra::{MemoryCache, CACHE_KEY_USER_LIST};

use super::user_store::DurableStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to the user collection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Produce the current user collection from the fastest tier that has it
    async fn refresh(&self) -> AppResult<Vec<User>>;
}

/// Tier that satisfied a `refresh` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Memory,
    Durable,
    Remote,
    /// Durable store read after a failed remote fetch
    StaleDurable,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Memory => "memory",
            Tier::Durable => "durable",
            Tier::Remote => "remote",
            Tier::StaleDurable => "stale-durable",
        };
        f.write_str(name)
    }
}

/// [`UserRepository`] over the three data tiers.
pub struct TieredUserRepository {
    cache: Arc<dyn MemoryCache>,
    store: Arc<dyn DurableStore>,
    remote: Arc<dyn RemoteSource>,
}

impl TieredUserRepository {
    pub fn new(
        cache: Arc<dyn MemoryCache>,
        store: Arc<dyn DurableStore>,
        remote: Arc<dyn RemoteSource>,
    ) -> Self {
        Self {
            cache,
            store,
            remote,
        }
    }

    async fn try_cache(&self) -> Option<Vec<User>> {
        let raw = match self.cache.read(CACHE_KEY_USER_LIST).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Memory cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<Vec<User>>(&raw) {
            Ok(users) if !users.is_empty() => Some(users),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Cached user list is unreadable, treating as miss");
                None
            }
        }
    }

    async fn try_durable(&self) -> Option<Vec<User>> {
        match self.store.read_users().await {
            Ok(users) if !users.is_empty() => Some(users),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Durable store read failed, treating as empty");
                None
            }
        }
    }

    /// Mirror a freshly fetched collection into the durable store and cache.
    async fn persist(&self, users: &[User]) {
        if let Err(e) = self.store.write_users(users).await {
            warn!(error = %e, "Failed to persist users to durable store");
        }

        match serde_json::to_string(users) {
            Ok(json) => {
                if let Err(e) = self.cache.write(CACHE_KEY_USER_LIST, json).await {
                    warn!(error = %e, "Failed to write users to memory cache");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode users for memory cache"),
        }
    }
}

fn served(tier: Tier, users: Vec<User>) -> AppResult<Vec<User>> {
    info!(tier = %tier, count = users.len(), "Users loaded");
    Ok(users)
}

#[async_trait]
impl UserRepository for TieredUserRepository {
    async fn refresh(&self) -> AppResult<Vec<User>> {
        if let Some(users) = self.try_cache().await {
            return served(Tier::Memory, users);
        }

        // TODO: decide whether a durable hit should also populate the cache;
        // today the next call reads the durable store again.
        if let Some(users) = self.try_durable().await {
            return served(Tier::Durable, users);
        }

        match self.remote.fetch_users().await {
            Ok(users) => {
                self.persist(&users).await;
                served(Tier::Remote, users)
            }
            Err(err) => {
                warn!(error = %err, "Remote fetch failed, falling back to durable store");
                match self.try_durable().await {
                    Some(users) => served(Tier::StaleDurable, users),
                    None => Err(AppError::no_data(err.to_string())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use common::FetchError;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::client::MockRemoteSource;
    use crate::infra::MockMemoryCache;
    use crate::repository::MockDurableStore;

    fn user(id: i64) -> User {
        User::new(id, format!("User {}", id), format!("user{}", id), format!("user{}@x.com", id))
    }

    fn encoded(users: &[User]) -> String {
        serde_json::to_string(users).unwrap()
    }

    fn repository(
        cache: MockMemoryCache,
        store: MockDurableStore,
        remote: MockRemoteSource,
    ) -> TieredUserRepository {
        TieredUserRepository::new(Arc::new(cache), Arc::new(store), Arc::new(remote))
    }

    fn empty_cache() -> MockMemoryCache {
        let mut cache = MockMemoryCache::new();
        cache.expect_read().returning(|_| Ok(None));
        cache
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits() {
        let seeded = vec![User::new(1, "A", "a", "a@x.com")];
        let json = encoded(&seeded);

        let mut cache = MockMemoryCache::new();
        cache
            .expect_read()
            .withf(|key| key == CACHE_KEY_USER_LIST)
            .times(1)
            .returning(move |_| Ok(Some(json.clone())));
        cache.expect_write().never();

        let mut store = MockDurableStore::new();
        store.expect_read_users().never();
        store.expect_write_users().never();

        let mut remote = MockRemoteSource::new();
        remote.expect_fetch_users().never();

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, seeded);
    }

    #[tokio::test]
    async fn test_durable_hit_skips_remote_and_cache_write() {
        let mut cache = empty_cache();
        cache.expect_write().never();

        let mut store = MockDurableStore::new();
        store
            .expect_read_users()
            .times(1)
            .returning(|| Ok(vec![user(2)]));
        store.expect_write_users().never();

        let mut remote = MockRemoteSource::new();
        remote.expect_fetch_users().never();

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, vec![user(2)]);
    }

    #[tokio::test]
    async fn test_remote_success_writes_both_tiers() {
        let mut cache = empty_cache();
        cache
            .expect_write()
            .withf(|key, value| {
                key == CACHE_KEY_USER_LIST
                    && serde_json::from_str::<Vec<User>>(value).unwrap() == vec![user(3)]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = MockDurableStore::new();
        store.expect_read_users().times(1).returning(|| Ok(vec![]));
        store
            .expect_write_users()
            .withf(|users| users == [user(3)])
            .times(1)
            .returning(|_| Ok(()));

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .times(1)
            .returning(|| Ok(vec![user(3)]));

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, vec![user(3)]);
    }

    #[tokio::test]
    async fn test_durable_data_wins_when_remote_would_fail() {
        let mut store = MockDurableStore::new();
        store.expect_read_users().returning(|| Ok(vec![user(4)]));

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .returning(|| Err(FetchError::network("offline")));

        let users = assert_ok!(repository(empty_cache(), store, remote).refresh().await);
        assert_eq!(users, vec![user(4)]);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_stale_durable() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();

        // Empty on the first read; a concurrent writer fills it before the second.
        let mut store = MockDurableStore::new();
        store.expect_read_users().times(2).returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![])
            } else {
                Ok(vec![user(4)])
            }
        });
        store.expect_write_users().never();

        let mut cache = empty_cache();
        cache.expect_write().never();

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .times(1)
            .returning(|| Err(FetchError::InvalidResponse(500)));

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, vec![user(4)]);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_total_failure_reports_remote_cause() {
        let mut store = MockDurableStore::new();
        store.expect_read_users().times(2).returning(|| Ok(vec![]));
        store.expect_write_users().never();

        let mut cache = empty_cache();
        cache.expect_write().never();

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .times(1)
            .returning(|| Err(FetchError::network("boom")));

        let err = assert_err!(repository(cache, store, remote).refresh().await);
        match err {
            AppError::NoDataAvailable(msg) => assert!(msg.contains("boom")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_cached_list_is_a_miss() {
        let mut cache = MockMemoryCache::new();
        cache
            .expect_read()
            .returning(|_| Ok(Some("[]".to_string())));

        let mut store = MockDurableStore::new();
        store.expect_read_users().times(1).returning(|| Ok(vec![user(5)]));

        let mut remote = MockRemoteSource::new();
        remote.expect_fetch_users().never();

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, vec![user(5)]);
    }

    #[tokio::test]
    async fn test_unreadable_tiers_count_as_empty() {
        let mut cache = MockMemoryCache::new();
        cache
            .expect_read()
            .returning(|_| Ok(Some("not json".to_string())));
        cache
            .expect_write()
            .times(1)
            .returning(|_, _| Err(AppError::internal("cache down")));

        let mut store = MockDurableStore::new();
        store
            .expect_read_users()
            .times(1)
            .returning(|| Err(AppError::internal("disk error")));
        store
            .expect_write_users()
            .times(1)
            .returning(|_| Err(AppError::internal("disk full")));

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .times(1)
            .returning(|| Ok(vec![user(6)]));

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users, vec![user(6)]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_persisted_as_fetched() {
        let fetched = vec![User::new(7, "A", "a", "a@x.com"), User::new(7, "B", "b", "b@x.com")];
        let expected = fetched.clone();

        let mut cache = empty_cache();
        cache.expect_write().times(1).returning(|_, _| Ok(()));

        let mut store = MockDurableStore::new();
        store.expect_read_users().times(1).returning(|| Ok(vec![]));
        store
            .expect_write_users()
            .withf(move |users| users == expected.as_slice())
            .times(1)
            .returning(|_| Ok(()));

        let mut remote = MockRemoteSource::new();
        remote
            .expect_fetch_users()
            .returning(move || Ok(fetched.clone()));

        let users = assert_ok!(repository(cache, store, remote).refresh().await);
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Memory.to_string(), "memory");
        assert_eq!(Tier::StaleDurable.to_string(), "stale-durable");
    }
}
