//! User service - Handles user-related use cases.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{User, UserDetail};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get the display model of one user
    async fn get_user_detail(&self, id: i64) -> AppResult<UserDetail>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.refresh().await
    }

    async fn get_user_detail(&self, id: i64) -> AppResult<UserDetail> {
        let users = self.repo.refresh().await?;
        let user = User::find(&users, id)?;
        Ok(UserDetail::from(user))
    }
}
