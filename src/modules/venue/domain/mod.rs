pub mod entities;
pub mod repository;

pub use entities::Venue;
pub use repository::VenueRepository;
