pub mod production_repository;

pub use production_repository::ProductionRepository;

#[cfg(test)]
pub use production_repository::MockProductionRepository;
