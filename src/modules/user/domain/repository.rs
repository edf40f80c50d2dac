use async_trait::async_trait;

use super::entities::User;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store the user unless one with the same id exists; returns the stored user
    async fn insert_if_absent(&self, user: &User) -> AppResult<User>;

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Case-insensitive substring match on the nickname
    async fn search_by_nickname(&self, query: &str, limit: usize) -> AppResult<Vec<User>>;
}
