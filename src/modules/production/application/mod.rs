pub mod ports;
pub mod service;

pub use ports::ProductionRepository;
pub use service::ProductionService;
