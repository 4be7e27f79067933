//! Repository layer for data access.

pub mod entities;
mod user_repository;
mod user_store;

pub use user_repository::{Tier, TieredUserRepository, UserRepository};
pub use user_store::{DurableStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_store::MockDurableStore;
