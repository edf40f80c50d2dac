/// Theater groups, their members and invitations
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{
    Group, GroupInvitation, GroupMember, GroupRepository, GroupVisibility, InvitationRepository,
    InvitationStatus,
};
pub use infrastructure::{InMemoryGroupRepository, InMemoryInvitationRepository};
pub use service::GroupService;
