use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{AgendaItem, GroupAgendaItem};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgendaRepository: Send + Sync {
    async fn insert_item(&self, item: &AgendaItem) -> AppResult<()>;

    async fn items_for(&self, user_id: &UserId) -> AppResult<Vec<AgendaItem>>;

    async fn insert_group_item(&self, item: &GroupAgendaItem) -> AppResult<()>;

    async fn group_items(&self, group_id: Uuid) -> AppResult<Vec<GroupAgendaItem>>;
}
