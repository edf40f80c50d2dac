/// Friendships and the mutual-connections count built on them
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{mutual_count, Friendship, FriendshipRepository, FriendshipStatus};
pub use infrastructure::InMemoryFriendshipRepository;
pub use service::SocialService;
