use std::sync::Arc;
use uuid::Uuid;

use super::domain::{Venue, VenueRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::log_info;

pub struct VenueService {
    repository: Arc<dyn VenueRepository>,
}

impl VenueService {
    pub fn new(repository: Arc<dyn VenueRepository>) -> Self {
        Self { repository }
    }

    pub async fn register_venue(&self, name: &str, city: Option<&str>) -> AppResult<Venue> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Venue name cannot be empty".to_string(),
            ));
        }

        let venue = Venue::new(name, city);
        self.repository.insert(&venue).await?;
        log_info!("Registered venue {} ({})", venue.name, venue.id);
        Ok(venue)
    }

    pub async fn get_venue(&self, id: Uuid) -> AppResult<Venue> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue with ID {} not found", id)))
    }

    /// All venues ordered by name, case-insensitively
    pub async fn list_venues(&self) -> AppResult<Vec<Venue>> {
        let mut venues = self.repository.list().await?;
        venues.sort_by_cached_key(|venue| venue.name.to_lowercase());
        Ok(venues)
    }
}
