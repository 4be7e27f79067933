//! User Service Library
//!
//! Lists users fetched from a remote REST API, mirrored into a durable
//! local store and a memory cache, and shows details for a single user.
//! Reads go through [`repository::TieredUserRepository`], which serves
//! the fastest tier that holds data.

pub mod client;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::CacheConfig;

use crate::client::UsersApiClient;
use crate::config::UserServiceConfig;
use crate::infra::{Database, InMemoryCache, MemoryCache, RedisCache};
use crate::repository::{TieredUserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Wire the three tiers from configuration into a ready service.
pub async fn build_user_service(
    config: &UserServiceConfig,
) -> Result<UserManager, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let store = Arc::new(UserStore::new(db.get_connection()));
    let cache = connect_cache(&config.cache).await?;
    let remote = Arc::new(UsersApiClient::new(&config.remote)?);

    let repo = Arc::new(TieredUserRepository::new(cache, store, remote));
    Ok(UserManager::new(repo))
}

async fn connect_cache(
    config: &CacheConfig,
) -> Result<Arc<dyn MemoryCache>, redis::RedisError> {
    match &config.url {
        Some(url) => {
            let cache = RedisCache::connect(url).await?;
            info!("Using Redis memory cache");
            Ok(Arc::new(cache))
        }
        None => Ok(Arc::new(InMemoryCache::new())),
    }
}

/// Print every user, one per line.
pub async fn run_list(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = build_user_service(&config).await?;
    let users = service.list_users().await?;

    for user in &users {
        println!("{:>4}  {:<28}  {}", user.id, user.name, user.email);
    }
    info!("Listed {} users", users.len());

    Ok(())
}

/// Print the detail view of one user.
pub async fn run_show(
    config: UserServiceConfig,
    id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = build_user_service(&config).await?;
    let detail = service.get_user_detail(id).await?;

    println!("{}", detail);

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
