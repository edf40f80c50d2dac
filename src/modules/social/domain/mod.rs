pub mod entities;
pub mod mutual;
pub mod repository;

pub use entities::{Friendship, FriendshipStatus};
pub use mutual::mutual_count;
pub use repository::FriendshipRepository;
