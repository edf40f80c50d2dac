pub mod entities;
pub mod repository;

pub use entities::{FeedItem, FeedItemKind};
pub use repository::FeedRepository;
