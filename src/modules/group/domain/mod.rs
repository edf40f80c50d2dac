pub mod entities;
pub mod repository;

pub use entities::{Group, GroupInvitation, GroupMember, GroupVisibility, InvitationStatus};
pub use repository::{GroupRepository, InvitationRepository};

#[cfg(test)]
pub use repository::MockGroupRepository;
