pub mod memory;

pub use memory::{InMemoryGroupRepository, InMemoryInvitationRepository};
