use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{LikeRepository, ProductionLike};
use crate::modules::production::{Production, ProductionRepository};
use crate::shared::domain::Identity;
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;

pub struct LikeService {
    likes: Arc<dyn LikeRepository>,
    productions: Arc<dyn ProductionRepository>,
}

impl LikeService {
    pub fn new(likes: Arc<dyn LikeRepository>, productions: Arc<dyn ProductionRepository>) -> Self {
        Self { likes, productions }
    }

    /// Liking twice keeps a single like; returns whether a new one was stored
    pub async fn like(
        &self,
        identity: Option<&Identity>,
        production_id: Uuid,
    ) -> AppResult<bool> {
        let identity = Identity::require(identity)?;
        if self.productions.find_by_id(production_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Production with ID {} not found",
                production_id
            )));
        }

        let like = ProductionLike::new(production_id, identity.user_id.clone());
        let stored = self.likes.insert_if_absent(&like).await?;
        if stored {
            log_debug!("{} liked production {}", identity.user_id, production_id);
        }
        Ok(stored)
    }

    /// Unliking something never liked is a no-op
    pub async fn unlike(
        &self,
        identity: Option<&Identity>,
        production_id: Uuid,
    ) -> AppResult<bool> {
        let identity = Identity::require(identity)?;
        self.likes.remove(production_id, &identity.user_id).await
    }

    /// Anonymous callers have liked nothing
    pub async fn has_liked(
        &self,
        identity: Option<&Identity>,
        production_id: Uuid,
    ) -> AppResult<bool> {
        match identity {
            Some(identity) => self.likes.exists(production_id, &identity.user_id).await,
            None => Ok(false),
        }
    }

    /// Liked productions, most recently liked first; removed productions are skipped
    pub async fn liked_productions_for_user(
        &self,
        identity: Option<&Identity>,
    ) -> AppResult<Vec<Production>> {
        let identity = Identity::require(identity)?;
        let likes = self.likes.by_user(&identity.user_id).await?;

        let found = try_join_all(
            likes
                .iter()
                .map(|like| self.productions.find_by_id(like.production_id)),
        )
        .await?;
        Ok(found.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::like::domain::repository::MockLikeRepository;
    use crate::modules::like::infrastructure::InMemoryLikeRepository;
    use crate::modules::production::infrastructure::InMemoryProductionRepository;
    use chrono::Utc;
    use tokio_test::{assert_err, assert_ok};

    async fn setup() -> (LikeService, Vec<Uuid>) {
        let productions = Arc::new(InMemoryProductionRepository::new());
        let mut ids = Vec::new();
        for title in ["Hamlet", "Medea", "Faust"] {
            let production = Production::new(title, "Toneelgroep", Utc::now());
            productions.save(&production).await.unwrap();
            ids.push(production.id);
        }
        let service = LikeService::new(Arc::new(InMemoryLikeRepository::new()), productions);
        (service, ids)
    }

    #[tokio::test]
    async fn like_is_idempotent_and_unlike_reverts_it() {
        let (service, ids) = setup().await;
        let me = Identity::new("fan");

        assert!(assert_ok!(service.like(Some(&me), ids[0]).await));
        assert!(!assert_ok!(service.like(Some(&me), ids[0]).await));
        assert!(assert_ok!(service.has_liked(Some(&me), ids[0]).await));
        assert_eq!(
            service.liked_productions_for_user(Some(&me)).await.unwrap().len(),
            1
        );

        assert!(assert_ok!(service.unlike(Some(&me), ids[0]).await));
        assert!(!assert_ok!(service.unlike(Some(&me), ids[0]).await));
        assert!(!assert_ok!(service.has_liked(Some(&me), ids[0]).await));
    }

    #[tokio::test]
    async fn liked_productions_are_most_recent_first() {
        let (service, ids) = setup().await;
        let me = Identity::new("fan");
        service.like(Some(&me), ids[1]).await.unwrap();
        service.like(Some(&me), ids[2]).await.unwrap();
        service.like(Some(&Identity::new("other")), ids[0]).await.unwrap();

        let titles: Vec<String> = service
            .liked_productions_for_user(Some(&me))
            .await
            .unwrap()
            .into_iter()
            .map(|production| production.title)
            .collect();
        assert_eq!(titles, vec!["Faust", "Medea"]);
    }

    #[tokio::test]
    async fn anonymous_and_unknown_are_rejected() {
        let (service, _) = setup().await;

        assert!(!assert_ok!(service.has_liked(None, Uuid::new_v4()).await));
        assert!(matches!(
            assert_err!(service.like(None, Uuid::new_v4()).await),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            assert_err!(service.like(Some(&Identity::new("fan")), Uuid::new_v4()).await),
            AppError::NotFound(_)
        ));
        assert_err!(service.liked_productions_for_user(None).await);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let mut likes = MockLikeRepository::new();
        likes
            .expect_by_user()
            .returning(|_| Err(AppError::DatabaseError("unavailable".into())));
        let service = LikeService::new(
            Arc::new(likes),
            Arc::new(InMemoryProductionRepository::new()),
        );

        assert!(matches!(
            service
                .liked_productions_for_user(Some(&Identity::new("fan")))
                .await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
