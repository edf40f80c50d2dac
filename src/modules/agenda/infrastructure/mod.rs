pub mod memory;

pub use memory::InMemoryAgendaRepository;
