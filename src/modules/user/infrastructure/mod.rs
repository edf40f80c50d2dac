pub mod memory;

pub use memory::InMemoryUserRepository;
