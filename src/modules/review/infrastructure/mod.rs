pub mod memory;
pub mod persistence;

pub use memory::{InMemoryReactionRepository, InMemoryReviewRepository};
pub use persistence::ReviewRepositoryImpl;
