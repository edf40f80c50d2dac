pub mod memory;
pub mod persistence;

pub use memory::InMemoryProductionRepository;
pub use persistence::ProductionRepositoryImpl;
