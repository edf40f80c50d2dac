//! Incremental maintenance of a production's rating aggregate.
//!
//! The aggregate is never rescanned on a user interaction; instead every
//! transition of a single user's star value is folded into the stored mean.
//! Everything here is pure: the caller loads the current aggregate, applies
//! the change and writes the result back (see `RateProductionHandler`).
use serde::{Deserialize, Serialize};

use crate::modules::rating::domain::value_objects::{RatingAggregate, StarRating};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::validation::MAX_STAR_RATING;

/// Which transition a (previous, new) pair of user ratings represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatingChange {
    /// The user re-selected their existing star, clearing it
    Removed { previous: StarRating },
    First { rating: StarRating },
    Updated { from: StarRating, to: StarRating },
    /// Nothing rated before or after
    Unchanged,
}

impl RatingChange {
    pub fn classify(previous: StarRating, new: StarRating) -> Self {
        if new == previous && !previous.is_none() {
            RatingChange::Removed { previous }
        } else if previous.is_none() && !new.is_none() {
            RatingChange::First { rating: new }
        } else if !previous.is_none() && !new.is_none() {
            RatingChange::Updated {
                from: previous,
                to: new,
            }
        } else {
            RatingChange::Unchanged
        }
    }

    /// The value to persist as the user's rating once the aggregate is written
    pub fn user_rating(&self) -> StarRating {
        match self {
            RatingChange::Removed { .. } | RatingChange::Unchanged => StarRating::NONE,
            RatingChange::First { rating } => *rating,
            RatingChange::Updated { to, .. } => *to,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, RatingChange::Unchanged)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingChange::Removed { .. } => "removed",
            RatingChange::First { .. } => "first",
            RatingChange::Updated { .. } => "updated",
            RatingChange::Unchanged => "unchanged",
        }
    }
}

/// Aggregate after a transition, together with the transition itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedRating {
    pub aggregate: RatingAggregate,
    pub change: RatingChange,
}

/// Fold one user's rating transition into `current`.
///
/// `previous` and `new` are raw star values; anything outside 0..=5 is a
/// `ValidationError`. A stored aggregate with a negative or non-finite mean
/// is rejected the same way, since it can never be repaired incrementally.
pub fn apply_rating_change(
    current: RatingAggregate,
    previous: i64,
    new: i64,
) -> AppResult<AppliedRating> {
    let previous = StarRating::new(previous)?;
    let new = StarRating::new(new)?;

    if !current.avg_rating.is_finite() || current.avg_rating < 0.0 {
        return Err(AppError::ValidationError(format!(
            "Stored average rating {} is not a valid mean",
            current.avg_rating
        )));
    }

    Ok(apply(current, previous, new))
}

/// Typed variant of [`apply_rating_change`] for already validated ratings
pub fn apply(current: RatingAggregate, previous: StarRating, new: StarRating) -> AppliedRating {
    let change = RatingChange::classify(previous, new);
    let RatingAggregate {
        avg_rating,
        rating_count,
    } = current;

    let aggregate = match change {
        RatingChange::Removed { previous } => {
            let avg = if rating_count > 1 {
                (avg_rating * f64::from(rating_count) - previous.as_f64())
                    / f64::from(rating_count - 1)
            } else {
                0.0
            };
            RatingAggregate::new(avg, rating_count.saturating_sub(1))
        }
        RatingChange::First { rating } => first_rating(avg_rating, rating_count, rating),
        RatingChange::Updated { from, to } => {
            if rating_count == 0 {
                // Corrupt aggregate: the user's old rating was never counted
                first_rating(avg_rating, rating_count, to)
            } else {
                let avg = (avg_rating * f64::from(rating_count) - from.as_f64() + to.as_f64())
                    / f64::from(rating_count);
                RatingAggregate::new(avg, rating_count)
            }
        }
        RatingChange::Unchanged => current,
    };

    AppliedRating {
        aggregate: settle(aggregate),
        change,
    }
}

fn first_rating(avg_rating: f64, rating_count: u32, rating: StarRating) -> RatingAggregate {
    let count = rating_count.saturating_add(1);
    let avg = (avg_rating * f64::from(rating_count) + rating.as_f64()) / f64::from(count);
    RatingAggregate::new(avg, count)
}

// Floating point noise must not push the mean outside the star range
fn settle(aggregate: RatingAggregate) -> RatingAggregate {
    if aggregate.rating_count == 0 {
        return RatingAggregate::EMPTY;
    }
    RatingAggregate::new(
        aggregate.avg_rating.clamp(0.0, f64::from(MAX_STAR_RATING)),
        aggregate.rating_count,
    )
}
