use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::production::application::ports::ProductionRepository;
use crate::modules::production::domain::Production;
use crate::modules::rating::application::ports::AggregateStore;
use crate::modules::rating::domain::{RatingAggregate, VersionedAggregate};
use crate::shared::errors::{AppError, AppResult};

/// Production catalog held in process memory.
///
/// Every mutation of one production happens under that entry's shard lock,
/// which is what makes `compare_and_swap` atomic.
#[derive(Default)]
pub struct InMemoryProductionRepository {
    productions: DashMap<Uuid, Production>,
}

impl InMemoryProductionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Production with ID {} not found", id))
    }
}

#[async_trait]
impl ProductionRepository for InMemoryProductionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Production>> {
        Ok(self.productions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, production: &Production) -> AppResult<()> {
        self.productions
            .entry(production.id)
            .and_modify(|existing| {
                existing.title = production.title.clone();
                existing.producer = production.producer.clone();
                existing.start_date = production.start_date;
            })
            .or_insert_with(|| production.clone());
        Ok(())
    }

    async fn find_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<Production>> {
        let mut upcoming: Vec<Production> = self
            .productions
            .iter()
            .filter(|entry| entry.is_upcoming(after))
            .map(|entry| entry.value().clone())
            .collect();

        upcoming.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        upcoming.truncate(limit);
        Ok(upcoming)
    }

    async fn search_by_title(&self, query: &str, limit: usize) -> AppResult<Vec<Production>> {
        let needle = query.to_lowercase();
        let mut matches: Vec<Production> = self
            .productions
            .iter()
            .filter(|entry| entry.title.to_lowercase().contains(&needle))
            .map(|entry| entry.value().clone())
            .collect();

        matches.sort_by(|a, b| a.title.cmp(&b.title));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn list_ids(&self) -> AppResult<Vec<Uuid>> {
        Ok(self.productions.iter().map(|entry| *entry.key()).collect())
    }

    async fn increment_review_count(&self, id: Uuid) -> AppResult<()> {
        let mut production = self
            .productions
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(id))?;
        production.review_count += 1;
        Ok(())
    }
}

#[async_trait]
impl AggregateStore for InMemoryProductionRepository {
    async fn load(&self, production_id: Uuid) -> AppResult<VersionedAggregate> {
        self.productions
            .get(&production_id)
            .map(|entry| entry.versioned_aggregate())
            .ok_or_else(|| Self::not_found(production_id))
    }

    async fn compare_and_swap(
        &self,
        production_id: Uuid,
        expected_version: u64,
        aggregate: RatingAggregate,
    ) -> AppResult<u64> {
        let mut production = self
            .productions
            .get_mut(&production_id)
            .ok_or_else(|| Self::not_found(production_id))?;

        if production.rating_version != expected_version {
            return Err(AppError::ConcurrencyConflict(format!(
                "Production {} is at rating version {}, expected {}",
                production_id, production.rating_version, expected_version
            )));
        }

        production.apply_aggregate(aggregate);
        Ok(production.rating_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let repo = InMemoryProductionRepository::new();
        let production = Production::new("Orlando", "Olympique Dramatique", Utc::now());
        repo.save(&production).await.unwrap();

        let v1 = repo
            .compare_and_swap(production.id, 0, RatingAggregate::new(4.0, 1))
            .await
            .unwrap();
        assert_eq!(v1, 1);

        let stale = repo
            .compare_and_swap(production.id, 0, RatingAggregate::new(2.0, 1))
            .await;
        assert!(matches!(stale, Err(AppError::ConcurrencyConflict(_))));

        let stored = repo.load(production.id).await.unwrap();
        assert_eq!(stored.aggregate, RatingAggregate::new(4.0, 1));
    }

    #[tokio::test]
    async fn save_keeps_existing_rating_summary() {
        let repo = InMemoryProductionRepository::new();
        let mut production = Production::new("Orlando", "Olympique Dramatique", Utc::now());
        repo.save(&production).await.unwrap();
        repo.compare_and_swap(production.id, 0, RatingAggregate::new(5.0, 1))
            .await
            .unwrap();

        production.title = "Orlando (reprise)".to_string();
        repo.save(&production).await.unwrap();

        let stored = repo.find_by_id(production.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Orlando (reprise)");
        assert_eq!(stored.rating_count, 1);
    }

    #[tokio::test]
    async fn upcoming_are_sorted_and_limited() {
        let repo = InMemoryProductionRepository::new();
        let now = Utc::now();
        for days in [5, -2, 1, 3] {
            repo.save(&Production::new(format!("Show {}", days), "", now + Duration::days(days)))
                .await
                .unwrap();
        }

        let upcoming = repo.find_upcoming(now, 2).await.unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Show 1", "Show 3"]);
    }

    #[tokio::test]
    async fn missing_production_load_is_not_found() {
        let repo = InMemoryProductionRepository::new();
        assert!(matches!(
            repo.load(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
