use async_trait::async_trait;
use dashmap::DashMap;

use crate::modules::user::domain::{User, UserRepository};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert_if_absent(&self, user: &User) -> AppResult<User> {
        let stored = self
            .users
            .entry(user.id.clone())
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.clone()))
    }

    async fn search_by_nickname(&self, query: &str, limit: usize) -> AppResult<Vec<User>> {
        let needle = query.to_lowercase();
        let mut found: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.nickname.to_lowercase().contains(&needle))
            .map(|entry| entry.clone())
            .collect();
        found.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        found.truncate(limit);
        Ok(found)
    }
}
