pub mod entities;
pub mod repository;

pub use entities::{
    Reaction, ReactionCounts, ReactionKind, Review, ToggleAction, ToggleOutcome,
};
pub use repository::{ReactionRepository, ReviewRepository};
