pub mod entities;
pub mod repository;

pub use entities::User;
pub use repository::UserRepository;
