pub mod memory;

pub use memory::InMemoryNotificationRepository;
