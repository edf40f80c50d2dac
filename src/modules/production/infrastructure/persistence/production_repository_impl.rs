use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use tokio::task;
use uuid::Uuid;

use super::models::{NewProduction, ProductionModel};
use crate::modules::production::application::ports::ProductionRepository;
use crate::modules::production::domain::Production;
use crate::modules::rating::application::ports::AggregateStore;
use crate::modules::rating::domain::{RatingAggregate, VersionedAggregate};
use crate::schema::productions;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;

pub struct ProductionRepositoryImpl {
    db: Arc<Database>,
}

impl ProductionRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Production with ID {} not found", id))
}

// LIKE wildcards in user input are matched literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ProductionRepository for ProductionRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Production>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Production>> {
            let mut conn = db.get_connection()?;

            let model = productions::table
                .find(id)
                .select(ProductionModel::as_select())
                .first(&mut conn)
                .optional()?;

            Ok(model.map(Production::from))
        })
        .await?
    }

    async fn save(&self, production: &Production) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let new_production = NewProduction::from(production);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            diesel::insert_into(productions::table)
                .values(&new_production)
                .on_conflict(productions::id)
                .do_update()
                .set((
                    productions::title.eq(excluded(productions::title)),
                    productions::producer.eq(excluded(productions::producer)),
                    productions::start_date.eq(excluded(productions::start_date)),
                ))
                .execute(&mut conn)?;

            Ok(())
        })
        .await?
    }

    async fn find_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<Production>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Production>> {
            let mut conn = db.get_connection()?;

            let rows = productions::table
                .filter(productions::start_date.gt(after))
                .order(productions::start_date.asc())
                .limit(limit as i64)
                .select(ProductionModel::as_select())
                .load(&mut conn)?;

            Ok(rows.into_iter().map(Production::from).collect())
        })
        .await?
    }

    async fn search_by_title(&self, query: &str, limit: usize) -> AppResult<Vec<Production>> {
        let db = Arc::clone(&self.db);
        let pattern = like_pattern(query);

        task::spawn_blocking(move || -> AppResult<Vec<Production>> {
            let mut conn = db.get_connection()?;

            let rows = productions::table
                .filter(productions::title.ilike(pattern))
                .order(productions::title.asc())
                .limit(limit as i64)
                .select(ProductionModel::as_select())
                .load(&mut conn)?;

            Ok(rows.into_iter().map(Production::from).collect())
        })
        .await?
    }

    async fn list_ids(&self) -> AppResult<Vec<Uuid>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Uuid>> {
            let mut conn = db.get_connection()?;
            Ok(productions::table
                .select(productions::id)
                .load::<Uuid>(&mut conn)?)
        })
        .await?
    }

    async fn increment_review_count(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            let updated = diesel::update(productions::table.find(id))
                .set(productions::review_count.eq(productions::review_count + 1))
                .execute(&mut conn)?;

            if updated == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await?
    }
}

#[async_trait]
impl AggregateStore for ProductionRepositoryImpl {
    async fn load(&self, production_id: Uuid) -> AppResult<VersionedAggregate> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<VersionedAggregate> {
            let mut conn = db.get_connection()?;

            let row: Option<(f64, i32, i64)> = productions::table
                .find(production_id)
                .select((
                    productions::avg_rating,
                    productions::rating_count,
                    productions::rating_version,
                ))
                .first(&mut conn)
                .optional()?;

            let (avg_rating, rating_count, version) =
                row.ok_or_else(|| not_found(production_id))?;

            Ok(VersionedAggregate::new(
                RatingAggregate::new(avg_rating, rating_count.max(0) as u32),
                version.max(0) as u64,
            ))
        })
        .await?
    }

    async fn compare_and_swap(
        &self,
        production_id: Uuid,
        expected_version: u64,
        aggregate: RatingAggregate,
    ) -> AppResult<u64> {
        let db = Arc::clone(&self.db);
        let start = std::time::Instant::now();

        let version = task::spawn_blocking(move || -> AppResult<u64> {
            let mut conn = db.get_connection()?;

            // Single conditional UPDATE: the row lock makes check and write atomic
            let new_version: Option<i64> = diesel::update(
                productions::table
                    .filter(productions::id.eq(production_id))
                    .filter(productions::rating_version.eq(expected_version as i64)),
            )
            .set((
                productions::avg_rating.eq(aggregate.avg_rating),
                productions::rating_count.eq(aggregate.rating_count as i32),
                productions::rating_version.eq(productions::rating_version + 1),
            ))
            .returning(productions::rating_version)
            .get_result(&mut conn)
            .optional()?;

            match new_version {
                Some(version) => Ok(version as u64),
                None => {
                    let exists: bool = diesel::select(diesel::dsl::exists(
                        productions::table.find(production_id),
                    ))
                    .get_result(&mut conn)?;

                    if exists {
                        Err(AppError::ConcurrencyConflict(format!(
                            "Production {} moved past rating version {}",
                            production_id, expected_version
                        )))
                    } else {
                        Err(not_found(production_id))
                    }
                }
            }
        })
        .await??;

        LogContext::db_operation(
            "compare_and_swap",
            "productions",
            Some(start.elapsed().as_millis() as u64),
        );
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("Hamlet"), "%Hamlet%");
    }
}
