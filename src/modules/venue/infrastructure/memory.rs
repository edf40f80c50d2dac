use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::venue::domain::{Venue, VenueRepository};
use crate::shared::errors::AppResult;

#[derive(Default)]
pub struct InMemoryVenueRepository {
    venues: DashMap<Uuid, Venue>,
}

impl InMemoryVenueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn insert(&self, venue: &Venue) -> AppResult<()> {
        self.venues.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Venue>> {
        Ok(self.venues.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> AppResult<Vec<Venue>> {
        Ok(self
            .venues
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
