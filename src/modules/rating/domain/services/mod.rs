pub mod rating_aggregator;

pub use rating_aggregator::{apply, apply_rating_change, AppliedRating, RatingChange};
