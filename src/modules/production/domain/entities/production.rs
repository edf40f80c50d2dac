use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::rating::domain::{RatingAggregate, VersionedAggregate};

/// A stage show together with its rating summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    pub id: Uuid,
    pub title: String,
    pub producer: String,
    pub start_date: DateTime<Utc>,
    pub avg_rating: f64,
    pub rating_count: u32,
    /// Number of written reviews; independent of the rating math
    pub review_count: u32,
    #[serde(skip)]
    pub rating_version: u64,
}

impl Production {
    /// Productions enter the catalog with an empty rating summary
    pub fn new(title: impl Into<String>, producer: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            producer: producer.into(),
            start_date,
            avg_rating: 0.0,
            rating_count: 0,
            review_count: 0,
            rating_version: 0,
        }
    }

    pub fn aggregate(&self) -> RatingAggregate {
        RatingAggregate::new(self.avg_rating, self.rating_count)
    }

    pub fn versioned_aggregate(&self) -> VersionedAggregate {
        VersionedAggregate::new(self.aggregate(), self.rating_version)
    }

    pub fn apply_aggregate(&mut self, aggregate: RatingAggregate) {
        self.avg_rating = aggregate.avg_rating;
        self.rating_count = aggregate.rating_count;
        self.rating_version += 1;
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date > now
    }
}
