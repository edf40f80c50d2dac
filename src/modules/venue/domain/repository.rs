use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Venue;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn insert(&self, venue: &Venue) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Venue>>;

    async fn list(&self) -> AppResult<Vec<Venue>>;
}
