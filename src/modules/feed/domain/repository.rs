use async_trait::async_trait;
use uuid::Uuid;

use super::entities::FeedItem;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedRepository: Send + Sync {
    async fn insert(&self, item: &FeedItem) -> AppResult<()>;

    /// Returns false when no such item existed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Items of any of `user_ids`, newest first
    async fn by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<FeedItem>>;
}
