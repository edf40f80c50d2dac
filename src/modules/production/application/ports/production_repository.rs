use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::production::domain::Production;
use crate::shared::errors::AppResult;

/// Catalog access for productions
///
/// The rating summary is only ever written through `AggregateStore`;
/// `save` here stores catalog fields and leaves an existing summary alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Production>>;

    /// Insert a new production or update title, producer and start date
    async fn save(&self, production: &Production) -> AppResult<()>;

    /// Productions starting after `after`, soonest first
    async fn find_upcoming(&self, after: DateTime<Utc>, limit: usize)
        -> AppResult<Vec<Production>>;

    /// Case-insensitive substring match on the title
    async fn search_by_title(&self, query: &str, limit: usize) -> AppResult<Vec<Production>>;

    async fn list_ids(&self) -> AppResult<Vec<Uuid>>;

    async fn increment_review_count(&self, id: Uuid) -> AppResult<()>;
}
