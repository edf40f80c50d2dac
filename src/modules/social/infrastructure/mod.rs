pub mod memory;

pub use memory::InMemoryFriendshipRepository;
