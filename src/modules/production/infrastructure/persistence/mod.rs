pub mod models;
pub mod production_repository_impl;

pub use production_repository_impl::ProductionRepositoryImpl;
