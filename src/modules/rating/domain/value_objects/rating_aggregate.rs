use serde::{Deserialize, Serialize};

use super::StarRating;

/// Running mean and count of every non-zero rating of a production
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAggregate {
    pub avg_rating: f64,
    pub rating_count: u32,
}

impl RatingAggregate {
    pub const EMPTY: RatingAggregate = RatingAggregate {
        avg_rating: 0.0,
        rating_count: 0,
    };

    pub fn new(avg_rating: f64, rating_count: u32) -> Self {
        Self {
            avg_rating,
            rating_count,
        }
    }

    /// Recompute from scratch; zero ratings are ignored
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = StarRating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .filter(|rating| !rating.is_none())
            .fold((0u64, 0u32), |(sum, count), rating| {
                (sum + u64::from(rating.value()), count + 1)
            });

        if count == 0 {
            return Self::EMPTY;
        }

        Self {
            avg_rating: sum as f64 / f64::from(count),
            rating_count: count,
        }
    }

    /// Sum of the underlying ratings
    pub fn total(&self) -> f64 {
        self.avg_rating * f64::from(self.rating_count)
    }

    pub fn differs_from(&self, other: &RatingAggregate, tolerance: f64) -> bool {
        self.rating_count != other.rating_count
            || (self.avg_rating - other.avg_rating).abs() > tolerance
    }
}

/// Aggregate as read from the store, with the version a later write must match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedAggregate {
    pub aggregate: RatingAggregate,
    pub version: u64,
}

impl VersionedAggregate {
    pub fn new(aggregate: RatingAggregate, version: u64) -> Self {
        Self { aggregate, version }
    }
}
