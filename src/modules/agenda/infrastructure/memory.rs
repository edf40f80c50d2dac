use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::agenda::domain::{AgendaItem, AgendaRepository, GroupAgendaItem};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[derive(Default)]
pub struct InMemoryAgendaRepository {
    items: RwLock<Vec<AgendaItem>>,
    group_items: RwLock<Vec<GroupAgendaItem>>,
}

impl InMemoryAgendaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgendaRepository for InMemoryAgendaRepository {
    async fn insert_item(&self, item: &AgendaItem) -> AppResult<()> {
        self.items.write().await.push(item.clone());
        Ok(())
    }

    async fn items_for(&self, user_id: &UserId) -> AppResult<Vec<AgendaItem>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| &item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_group_item(&self, item: &GroupAgendaItem) -> AppResult<()> {
        self.group_items.write().await.push(item.clone());
        Ok(())
    }

    async fn group_items(&self, group_id: Uuid) -> AppResult<Vec<GroupAgendaItem>> {
        let items = self.group_items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.group_id == group_id)
            .cloned()
            .collect())
    }
}
