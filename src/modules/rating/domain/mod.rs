pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use services::{apply_rating_change, AppliedRating, RatingChange};
pub use value_objects::{RatingAggregate, StarRating, VersionedAggregate};
