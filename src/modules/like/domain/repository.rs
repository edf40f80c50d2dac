use async_trait::async_trait;
use uuid::Uuid;

use super::entities::ProductionLike;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

/// At most one like per (production, user)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Returns false when the user already liked the production
    async fn insert_if_absent(&self, like: &ProductionLike) -> AppResult<bool>;

    /// Returns false when there was nothing to remove
    async fn remove(&self, production_id: Uuid, user_id: &UserId) -> AppResult<bool>;

    async fn exists(&self, production_id: Uuid, user_id: &UserId) -> AppResult<bool>;

    /// Likes of one user, most recent first
    async fn by_user(&self, user_id: &UserId) -> AppResult<Vec<ProductionLike>>;
}
