use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::notification::domain::{Notification, NotificationRepository};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

/// Append-only log of notifications, oldest first
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let mut notifications = self.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.mark_read();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn for_recipient(&self, recipient_id: &UserId) -> AppResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .rev()
            .filter(|n| &n.recipient_id == recipient_id)
            .cloned()
            .collect())
    }

    async fn find_friend_request(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> AppResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .rev()
            .find(|n| {
                &n.recipient_id == recipient_id && n.payload.is_friend_request_from(sender_id)
            })
            .cloned())
    }
}
