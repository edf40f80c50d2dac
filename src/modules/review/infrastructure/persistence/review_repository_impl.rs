/// Diesel-based review storage
///
/// The same table backs the per-user rating (`UserRatingStore`) and the
/// rating recomputation (`RatingLedger`).
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tokio::task;
use uuid::Uuid;

use super::models::{parse_reactions, NewReview, ReactionsRow, ReviewModel};
use crate::modules::rating::application::ports::{RatingLedger, UserRatingStore};
use crate::modules::rating::domain::StarRating;
use crate::modules::review::domain::{ReactionCounts, ReactionKind, Review, ReviewRepository};
use crate::schema::production_reviews;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct ReviewRepositoryImpl {
    db: Arc<Database>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn into_entities(models: Vec<ReviewModel>) -> AppResult<Vec<Review>> {
    models.into_iter().map(ReviewModel::into_entity).collect()
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn find(&self, production_id: Uuid, user_id: &UserId) -> AppResult<Option<Review>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.as_str().to_string();

        task::spawn_blocking(move || -> AppResult<Option<Review>> {
            let mut conn = db.get_connection()?;

            production_reviews::table
                .filter(production_reviews::production_id.eq(production_id))
                .filter(production_reviews::user_id.eq(user_id))
                .select(ReviewModel::as_select())
                .first(&mut conn)
                .optional()?
                .map(ReviewModel::into_entity)
                .transpose()
        })
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Review>> {
            let mut conn = db.get_connection()?;

            production_reviews::table
                .find(id)
                .select(ReviewModel::as_select())
                .first(&mut conn)
                .optional()?
                .map(ReviewModel::into_entity)
                .transpose()
        })
        .await?
    }

    async fn save(&self, review: &Review) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let new_review = NewReview::from(review);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            diesel::insert_into(production_reviews::table)
                .values(&new_review)
                .on_conflict((production_reviews::production_id, production_reviews::user_id))
                .do_update()
                .set((
                    production_reviews::visited.eq(excluded(production_reviews::visited)),
                    production_reviews::rating.eq(excluded(production_reviews::rating)),
                    production_reviews::review.eq(excluded(production_reviews::review)),
                    production_reviews::updated_at.eq(excluded(production_reviews::updated_at)),
                ))
                .execute(&mut conn)?;

            Ok(())
        })
        .await?
    }

    async fn for_production(&self, production_id: Uuid, limit: usize) -> AppResult<Vec<Review>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Review>> {
            let mut conn = db.get_connection()?;

            let rows = production_reviews::table
                .filter(production_reviews::production_id.eq(production_id))
                .order(production_reviews::created_at.desc())
                .limit(limit as i64)
                .select(ReviewModel::as_select())
                .load(&mut conn)?;

            into_entities(rows)
        })
        .await?
    }

    async fn by_user(&self, user_id: &UserId) -> AppResult<Vec<Review>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.as_str().to_string();

        task::spawn_blocking(move || -> AppResult<Vec<Review>> {
            let mut conn = db.get_connection()?;

            let rows = production_reviews::table
                .filter(production_reviews::user_id.eq(user_id))
                .order(production_reviews::created_at.desc())
                .select(ReviewModel::as_select())
                .load(&mut conn)?;

            into_entities(rows)
        })
        .await?
    }

    async fn adjust_reaction_count(
        &self,
        review_id: Uuid,
        kind: ReactionKind,
        increment: bool,
    ) -> AppResult<ReactionCounts> {
        let db = Arc::clone(&self.db);
        let delta: i32 = if increment { 1 } else { -1 };

        task::spawn_blocking(move || -> AppResult<ReactionCounts> {
            let mut conn = db.get_connection()?;

            // Read-modify-write inside one statement so concurrent toggles don't lose counts
            let row: Option<ReactionsRow> = diesel::sql_query(
                "UPDATE production_reviews
                 SET reactions = jsonb_set(
                     reactions,
                     ARRAY[$2],
                     to_jsonb(GREATEST(COALESCE((reactions ->> $2)::int, 0) + $3, 0))
                 )
                 WHERE id = $1
                 RETURNING reactions",
            )
            .bind::<diesel::sql_types::Uuid, _>(review_id)
            .bind::<diesel::sql_types::Text, _>(kind.as_str())
            .bind::<diesel::sql_types::Integer, _>(delta)
            .get_result(&mut conn)
            .optional()?;

            let row = row
                .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;
            parse_reactions(row.reactions)
        })
        .await?
    }
}

#[async_trait]
impl UserRatingStore for ReviewRepositoryImpl {
    async fn load_user_rating(
        &self,
        user_id: &UserId,
        production_id: Uuid,
    ) -> AppResult<StarRating> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.as_str().to_string();

        task::spawn_blocking(move || -> AppResult<StarRating> {
            let mut conn = db.get_connection()?;

            let rating: Option<i16> = production_reviews::table
                .filter(production_reviews::production_id.eq(production_id))
                .filter(production_reviews::user_id.eq(user_id))
                .select(production_reviews::rating)
                .first(&mut conn)
                .optional()?;

            match rating {
                Some(value) => StarRating::new(i64::from(value)),
                None => Ok(StarRating::NONE),
            }
        })
        .await?
    }

    async fn save_user_rating(
        &self,
        user_id: &UserId,
        production_id: Uuid,
        rating: StarRating,
    ) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let mut review = Review::visited(production_id, user_id.clone());
        review.set_rating(rating);
        let new_review = NewReview::from(&review);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            diesel::insert_into(production_reviews::table)
                .values(&new_review)
                .on_conflict((production_reviews::production_id, production_reviews::user_id))
                .do_update()
                .set((
                    production_reviews::rating.eq(excluded(production_reviews::rating)),
                    production_reviews::visited.eq(true),
                    production_reviews::updated_at.eq(Utc::now()),
                ))
                .execute(&mut conn)?;

            Ok(())
        })
        .await?
    }
}

#[async_trait]
impl RatingLedger for ReviewRepositoryImpl {
    async fn ratings_for(&self, production_id: Uuid) -> AppResult<Vec<StarRating>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<StarRating>> {
            let mut conn = db.get_connection()?;

            let values: Vec<i16> = production_reviews::table
                .filter(production_reviews::production_id.eq(production_id))
                .filter(production_reviews::rating.gt(0))
                .select(production_reviews::rating)
                .load(&mut conn)?;

            values
                .into_iter()
                .map(|value| StarRating::new(i64::from(value)))
                .collect()
        })
        .await?
    }
}
