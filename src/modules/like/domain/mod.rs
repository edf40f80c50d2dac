pub mod entities;
pub mod repository;

pub use entities::ProductionLike;
pub use repository::LikeRepository;
