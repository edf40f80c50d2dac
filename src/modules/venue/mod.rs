/// Catalog of theaters where productions are played
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{Venue, VenueRepository};
pub use infrastructure::InMemoryVenueRepository;
pub use service::VenueService;
