pub mod memory;

pub use memory::InMemoryLikeRepository;
