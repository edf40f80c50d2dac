pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::{
    AggregateStore, RateProductionCommand, RateProductionHandler, RateProductionResult,
    RatingLedger, RatingReconciler, ReconciliationWorker, UserRatingStore,
};
pub use domain::{apply_rating_change, RatingAggregate, RatingChange, StarRating, VersionedAggregate};
