use std::sync::Arc;
use uuid::Uuid;

use super::domain::{FeedItem, FeedItemKind, FeedRepository};
use crate::modules::social::SocialService;
use crate::shared::application::{CursorPage, PageRequest};
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::log_debug;

pub struct FeedService {
    repository: Arc<dyn FeedRepository>,
    social: Arc<SocialService>,
}

impl FeedService {
    pub fn new(repository: Arc<dyn FeedRepository>, social: Arc<SocialService>) -> Self {
        Self { repository, social }
    }

    pub async fn publish(&self, user_id: &UserId, kind: FeedItemKind) -> AppResult<FeedItem> {
        let item = FeedItem::new(user_id.clone(), kind);
        self.repository.insert(&item).await?;
        log_debug!("Published feed item {} for {}", item.id, user_id);
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Feed item {} not found", id)));
        }
        Ok(())
    }

    pub async fn items_from_user_for_production(
        &self,
        user_id: &UserId,
        production_id: Uuid,
    ) -> AppResult<Vec<FeedItem>> {
        let items = self
            .repository
            .by_users(std::slice::from_ref(user_id))
            .await?;
        Ok(items
            .into_iter()
            .filter(|item| item.kind.production_id() == production_id)
            .collect())
    }

    /// Activity of the user's accepted friends, newest first
    pub async fn items_for_user(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> AppResult<CursorPage<FeedItem>> {
        Validator::validate_page_size(page.num_items)?;

        let friends: Vec<UserId> = self
            .social
            .accepted_friend_ids(user_id)
            .await?
            .into_iter()
            .collect();

        if friends.is_empty() {
            return Ok(CursorPage::empty());
        }

        let items = self.repository.by_users(&friends).await?;
        CursorPage::slice(items, page)
    }
}
