use std::sync::Arc;

use super::domain::{User, UserRepository};
use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::log_debug;

pub const USER_SEARCH_LIMIT: usize = 10;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Make sure the signed-in caller has a profile; safe to call on every request
    pub async fn ensure_user(&self, identity: Option<&Identity>) -> AppResult<User> {
        let identity = Identity::require(identity)?;
        let user = User::from_identity(identity)?;
        Validator::validate_nickname(&user.nickname)?;

        let stored = self.repository.insert_if_absent(&user).await?;
        log_debug!("Ensured user {} ({})", stored.id, stored.nickname);
        Ok(stored)
    }

    pub async fn get_user(&self, id: &UserId) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Nickname search that never returns the caller
    pub async fn search_users(
        &self,
        identity: Option<&Identity>,
        query: &str,
        limit: usize,
    ) -> AppResult<Vec<User>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let caller = identity.map(|i| &i.user_id);
        // One extra so dropping the caller still fills the page
        let found = self.repository.search_by_nickname(query, limit + 1).await?;
        Ok(found
            .into_iter()
            .filter(|user| Some(&user.id) != caller)
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::infrastructure::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let service = service();
        let me = Identity::new("u1").with_profile("Anna", "anna@example.org");

        let first = service.ensure_user(Some(&me)).await.unwrap();
        let renamed = Identity::new("u1").with_profile("Anneke", "anna@example.org");
        let second = service.ensure_user(Some(&renamed)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.get_user(&UserId::from("u1")).await.unwrap().nickname, "Anna");
    }

    #[tokio::test]
    async fn ensure_user_requires_profile() {
        let service = service();
        let result = service.ensure_user(Some(&Identity::new("u1"))).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(matches!(
            service.get_user(&UserId::from("u1")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn search_excludes_caller() {
        let service = service();
        let me = Identity::new("me").with_profile("Theaterfan", "me@example.org");
        let other = Identity::new("other").with_profile("Theaterliefhebber", "o@example.org");
        service.ensure_user(Some(&me)).await.unwrap();
        service.ensure_user(Some(&other)).await.unwrap();

        let found = service.search_users(Some(&me), "theater", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, UserId::from("other"));

        assert!(service.search_users(Some(&me), "  ", 5).await.unwrap().is_empty());
    }
}
