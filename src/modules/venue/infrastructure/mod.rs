pub mod memory;

pub use memory::InMemoryVenueRepository;
