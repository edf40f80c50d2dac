use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::rating::domain::StarRating;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

/// Port for the per-user rating, stored on the user's review of a production
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRatingStore: Send + Sync {
    /// `StarRating::NONE` when the user never rated (or has no review)
    async fn load_user_rating(&self, user_id: &UserId, production_id: Uuid)
        -> AppResult<StarRating>;

    /// Creates a visited review when the user has none yet
    async fn save_user_rating(
        &self,
        user_id: &UserId,
        production_id: Uuid,
        rating: StarRating,
    ) -> AppResult<()>;
}

/// Read side used to recompute aggregates from scratch
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingLedger: Send + Sync {
    /// Every non-zero rating currently stored for the production
    async fn ratings_for(&self, production_id: Uuid) -> AppResult<Vec<StarRating>>;
}
