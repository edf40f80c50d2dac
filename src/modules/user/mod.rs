/// User profiles mirrored from the auth platform
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{User, UserRepository};
pub use infrastructure::InMemoryUserRepository;
pub use service::UserService;
