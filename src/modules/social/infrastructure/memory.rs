use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::social::domain::{Friendship, FriendshipRepository, FriendshipStatus};
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};

/// Friendships keyed by their unordered user pair
#[derive(Default)]
pub struct InMemoryFriendshipRepository {
    friendships: DashMap<(UserId, UserId), Friendship>,
}

impl InMemoryFriendshipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryFriendshipRepository {
    async fn insert_if_absent(&self, friendship: &Friendship) -> AppResult<bool> {
        match self.friendships.entry(friendship.key()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(friendship.clone());
                Ok(true)
            }
        }
    }

    async fn find_between(&self, a: &UserId, b: &UserId) -> AppResult<Option<Friendship>> {
        Ok(self
            .friendships
            .get(&Friendship::pair_key(a, b))
            .map(|entry| entry.value().clone()))
    }

    async fn update_status(&self, id: Uuid, status: FriendshipStatus) -> AppResult<Friendship> {
        let mut entry = self
            .friendships
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Friendship {} not found", id)))?;

        entry.set_status(status);
        Ok(entry.value().clone())
    }

    async fn for_user(
        &self,
        user_id: &UserId,
        status: Option<FriendshipStatus>,
    ) -> AppResult<Vec<Friendship>> {
        Ok(self
            .friendships
            .iter()
            .filter(|entry| entry.involves(user_id))
            .filter(|entry| status.map_or(true, |s| entry.status == s))
            .map(|entry| entry.value().clone())
            .collect())
    }
}
