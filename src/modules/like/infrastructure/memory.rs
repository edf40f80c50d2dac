use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::modules::like::domain::{LikeRepository, ProductionLike};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[derive(Default)]
pub struct InMemoryLikeRepository {
    // value carries the insertion sequence for recency ordering
    likes: DashMap<(Uuid, UserId), (u64, ProductionLike)>,
    next_seq: AtomicU64,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn insert_if_absent(&self, like: &ProductionLike) -> AppResult<bool> {
        match self.likes.entry((like.production_id, like.user_id.clone())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, like.clone()));
                Ok(true)
            }
        }
    }

    async fn remove(&self, production_id: Uuid, user_id: &UserId) -> AppResult<bool> {
        Ok(self
            .likes
            .remove(&(production_id, user_id.clone()))
            .is_some())
    }

    async fn exists(&self, production_id: Uuid, user_id: &UserId) -> AppResult<bool> {
        Ok(self.likes.contains_key(&(production_id, user_id.clone())))
    }

    async fn by_user(&self, user_id: &UserId) -> AppResult<Vec<ProductionLike>> {
        let mut likes: Vec<(u64, ProductionLike)> = self
            .likes
            .iter()
            .filter(|entry| &entry.key().1 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        likes.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(likes.into_iter().map(|(_, like)| like).collect())
    }
}
