use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Friendship, FriendshipStatus};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Store the friendship unless the pair already has one, in either direction.
    /// Returns false when one existed.
    async fn insert_if_absent(&self, friendship: &Friendship) -> AppResult<bool>;

    async fn find_between(&self, a: &UserId, b: &UserId) -> AppResult<Option<Friendship>>;

    async fn update_status(&self, id: Uuid, status: FriendshipStatus) -> AppResult<Friendship>;

    /// Friendships the user takes part in, optionally filtered by status
    async fn for_user(
        &self,
        user_id: &UserId,
        status: Option<FriendshipStatus>,
    ) -> AppResult<Vec<Friendship>>;
}
