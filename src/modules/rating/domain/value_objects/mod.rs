pub mod rating_aggregate;
pub mod star_rating;

pub use rating_aggregate::{RatingAggregate, VersionedAggregate};
pub use star_rating::StarRating;
