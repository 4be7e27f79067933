//! Durable store for the last known-good user collection.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Local persistence of the user collection.
///
/// An empty collection means "nothing stored"; it is not an error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read the stored collection in the order it was written
    async fn read_users(&self) -> AppResult<Vec<User>>;

    /// Replace the stored collection with `users`
    async fn write_users(&self, users: &[User]) -> AppResult<()>;
}

/// SeaORM implementation of [`DurableStore`]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DurableStore for UserStore {
    async fn read_users(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Position)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn write_users(&self, users: &[User]) -> AppResult<()> {
        let rows = users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let position = i32::try_from(index).map_err(|_| {
                    AppError::internal(format!("user collection too large: {}", users.len()))
                })?;
                Ok(ActiveModel::from_user(position, user))
            })
            .collect::<AppResult<Vec<_>>>()?;

        // Delete and insert commit together or not at all
        let txn = self.db.begin().await?;

        UserEntity::delete_many().exec(&txn).await?;

        if !rows.is_empty() {
            UserEntity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        tracing::debug!(count = users.len(), "User collection replaced in durable store");

        Ok(())
    }
}
