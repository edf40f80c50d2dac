use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// A user's star value for one production, 0 meaning "no rating"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StarRating(u8);

impl StarRating {
    pub const NONE: StarRating = StarRating(0);

    /// Out-of-range values are rejected, never clamped
    pub fn new(value: i64) -> AppResult<Self> {
        Validator::validate_star_rating(value).map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<i64> for StarRating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for i64 {
    fn from(rating: StarRating) -> Self {
        i64::from(rating.0)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
