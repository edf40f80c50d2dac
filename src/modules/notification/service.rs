use std::sync::Arc;
use uuid::Uuid;

use super::domain::{Notification, NotificationPayload, NotificationRepository};
use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;

pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn notify(
        &self,
        recipient_id: &UserId,
        payload: NotificationPayload,
    ) -> AppResult<Notification> {
        let notification = Notification::new(recipient_id.clone(), payload);
        self.repository.insert(&notification).await?;

        log_debug!(
            "Notified {} of {} from {}",
            recipient_id,
            notification.payload.kind(),
            notification.payload.sender_id()
        );
        Ok(notification)
    }

    /// Unread notifications of the caller, newest first
    pub async fn unread_for(&self, identity: Option<&Identity>) -> AppResult<Vec<Notification>> {
        let identity = Identity::require(identity)?;
        let all = self.repository.for_recipient(&identity.user_id).await?;
        Ok(all.into_iter().filter(|n| !n.read).collect())
    }

    pub async fn has_unread(&self, identity: Option<&Identity>) -> AppResult<bool> {
        Ok(!self.unread_for(identity).await?.is_empty())
    }

    /// Only the recipient may mark a notification read
    pub async fn mark_read(&self, identity: Option<&Identity>, id: Uuid) -> AppResult<()> {
        let identity = Identity::require(identity)?;

        let notification = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))?;

        if notification.recipient_id != identity.user_id {
            return Err(AppError::Unauthorized(
                "Cannot mark another user's notification as read".to_string(),
            ));
        }

        self.repository.mark_read(id).await?;
        Ok(())
    }

    pub async fn find_friend_request(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> AppResult<Option<Notification>> {
        self.repository
            .find_friend_request(recipient_id, sender_id)
            .await
    }
}
