use crate::modules::rating::domain::StarRating;
use crate::modules::review::domain::{ReactionCounts, Review};
use crate::schema::production_reviews;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = production_reviews)]
pub struct ReviewModel {
    pub id: Uuid,
    pub production_id: Uuid,
    pub user_id: String,
    pub visited: bool,
    pub rating: i16,
    pub review: Option<String>,
    pub reactions: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting; reactions start from the column default
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = production_reviews)]
pub struct NewReview {
    pub id: Uuid,
    pub production_id: Uuid,
    pub user_id: String,
    pub visited: bool,
    pub rating: i16,
    pub review: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Helper struct for RETURNING reactions
#[derive(QueryableByName)]
pub struct ReactionsRow {
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub reactions: JsonValue,
}

pub fn parse_reactions(value: JsonValue) -> AppResult<ReactionCounts> {
    serde_json::from_value(value)
        .map_err(|e| AppError::SerializationError(format!("Invalid reaction counts: {}", e)))
}

impl ReviewModel {
    pub fn into_entity(self) -> AppResult<Review> {
        Ok(Review {
            id: self.id,
            production_id: self.production_id,
            user_id: UserId::new(self.user_id),
            visited: self.visited,
            rating: StarRating::new(i64::from(self.rating))?,
            text: self.review,
            reactions: parse_reactions(self.reactions)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&Review> for NewReview {
    fn from(review: &Review) -> Self {
        NewReview {
            id: review.id,
            production_id: review.production_id,
            user_id: review.user_id.as_str().to_string(),
            visited: review.visited,
            rating: i16::from(review.rating.value()),
            review: review.text.clone(),
            updated_at: review.updated_at,
        }
    }
}
