use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{ReactionCounts, ReactionKind, Review};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find(&self, production_id: Uuid, user_id: &UserId) -> AppResult<Option<Review>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    /// Insert or update by id; reaction counts are left to `adjust_reaction_count`
    async fn save(&self, review: &Review) -> AppResult<()>;

    /// Newest first
    async fn for_production(&self, production_id: Uuid, limit: usize) -> AppResult<Vec<Review>>;

    /// Newest first
    async fn by_user(&self, user_id: &UserId) -> AppResult<Vec<Review>>;

    /// Atomically add one to (or remove one from, floored at 0) a reaction count
    async fn adjust_reaction_count(
        &self,
        review_id: Uuid,
        kind: ReactionKind,
        increment: bool,
    ) -> AppResult<ReactionCounts>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Add the reaction if absent, remove it if present; returns whether it now exists
    async fn toggle(&self, review_id: Uuid, user_id: &UserId, kind: ReactionKind)
        -> AppResult<bool>;

    async fn kinds_by_user(&self, review_id: Uuid, user_id: &UserId)
        -> AppResult<Vec<ReactionKind>>;
}
