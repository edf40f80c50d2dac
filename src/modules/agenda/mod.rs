/// Personal and group agendas of planned theater visits
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{AgendaItem, AgendaRepository, AgendaStatus, GroupAgendaItem, Visit};
pub use infrastructure::InMemoryAgendaRepository;
pub use service::AgendaService;
