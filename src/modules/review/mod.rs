pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{
    ReactionCounts, ReactionKind, ReactionRepository, Review, ReviewRepository, ToggleAction,
    ToggleOutcome,
};
pub use infrastructure::{InMemoryReactionRepository, InMemoryReviewRepository, ReviewRepositoryImpl};
pub use service::ReviewService;
