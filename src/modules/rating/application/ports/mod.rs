pub mod aggregate_store;
pub mod user_rating_store;

pub use aggregate_store::AggregateStore;
pub use user_rating_store::{RatingLedger, UserRatingStore};

#[cfg(test)]
pub use aggregate_store::MockAggregateStore;
#[cfg(test)]
pub use user_rating_store::{MockRatingLedger, MockUserRatingStore};
