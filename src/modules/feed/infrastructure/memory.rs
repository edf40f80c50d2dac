use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::feed::domain::{FeedItem, FeedRepository};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

/// Feed items in publication order
#[derive(Default)]
pub struct InMemoryFeedRepository {
    items: RwLock<Vec<FeedItem>>,
}

impl InMemoryFeedRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedRepository for InMemoryFeedRepository {
    async fn insert(&self, item: &FeedItem) -> AppResult<()> {
        self.items.write().await.push(item.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    async fn by_users(&self, user_ids: &[UserId]) -> AppResult<Vec<FeedItem>> {
        let wanted: HashSet<&UserId> = user_ids.iter().collect();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .rev()
            .filter(|item| wanted.contains(&item.user_id))
            .cloned()
            .collect())
    }
}
