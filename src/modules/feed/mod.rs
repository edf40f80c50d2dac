/// Friends' activity feed with offset-cursor pagination
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{FeedItem, FeedItemKind, FeedRepository};
pub use infrastructure::InMemoryFeedRepository;
pub use service::FeedService;
