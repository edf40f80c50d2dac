use serde::Serialize;
use uuid::Uuid;

use crate::modules::rating::domain::{RatingAggregate, RatingChange, StarRating};

/// Outcome of a rating click
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateProductionResult {
    pub production_id: Uuid,
    pub change: RatingChange,
    /// The user's rating after the click (0 when cleared)
    pub user_rating: StarRating,
    pub aggregate: RatingAggregate,
    pub version: u64,
}
