pub mod production_store;

pub use production_store::InMemoryProductionRepository;
