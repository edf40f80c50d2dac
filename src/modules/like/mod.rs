/// Productions a user has marked as liked
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{LikeRepository, ProductionLike};
pub use infrastructure::InMemoryLikeRepository;
pub use service::LikeService;
