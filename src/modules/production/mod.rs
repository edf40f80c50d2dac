pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ProductionRepository, ProductionService};
pub use domain::Production;
