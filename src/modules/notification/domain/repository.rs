use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Notification;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Returns false when the notification does not exist
    async fn mark_read(&self, id: Uuid) -> AppResult<bool>;

    /// Newest first
    async fn for_recipient(&self, recipient_id: &UserId) -> AppResult<Vec<Notification>>;

    /// Most recent friend request from `sender_id` to `recipient_id`
    async fn find_friend_request(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> AppResult<Option<Notification>>;
}
