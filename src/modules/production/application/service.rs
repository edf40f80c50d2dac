use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::ports::ProductionRepository;
use crate::modules::production::domain::Production;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::log_debug;

/// Premieres shown on the home page
pub const UPCOMING_LIMIT: usize = 10;

pub struct ProductionService {
    repository: Arc<dyn ProductionRepository>,
}

impl ProductionService {
    pub fn new(repository: Arc<dyn ProductionRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_production(&self, id: Uuid) -> AppResult<Production> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Production with ID {} not found", id)))
    }

    /// Add a production to the catalog
    pub async fn register(&self, production: Production) -> AppResult<Production> {
        if production.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Production title cannot be empty".to_string(),
            ));
        }
        self.repository.save(&production).await?;
        log_debug!("Registered production {} ({})", production.title, production.id);
        Ok(production)
    }

    pub async fn upcoming_premieres(&self, now: DateTime<Utc>) -> AppResult<Vec<Production>> {
        self.repository.find_upcoming(now, UPCOMING_LIMIT).await
    }

    pub async fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<Production>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.repository.search_by_title(query, limit).await?;
        LogContext::search_operation(query, Some("productions"), Some(results.len()));
        Ok(results)
    }

    pub async fn list_ids(&self) -> AppResult<Vec<Uuid>> {
        self.repository.list_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ports::MockProductionRepository;

    #[tokio::test]
    async fn missing_production_is_not_found() {
        let mut repository = MockProductionRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductionService::new(Arc::new(repository));
        let result = service.get_production(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn upcoming_asks_for_ten() {
        let mut repository = MockProductionRepository::new();
        repository
            .expect_find_upcoming()
            .withf(|_, limit| *limit == UPCOMING_LIMIT)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let service = ProductionService::new(Arc::new(repository));
        assert!(service.upcoming_premieres(Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_title_search_skips_repository() {
        let service = ProductionService::new(Arc::new(MockProductionRepository::new()));
        assert!(service.search_titles("   ", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn untitled_productions_are_rejected() {
        let service = ProductionService::new(Arc::new(MockProductionRepository::new()));
        let result = service.register(Production::new(" ", "", Utc::now())).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
