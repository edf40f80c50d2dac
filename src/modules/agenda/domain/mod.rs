pub mod entities;
pub mod repository;

pub use entities::{AgendaItem, AgendaStatus, GroupAgendaItem, Visit};
pub use repository::AgendaRepository;
