use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Group, GroupInvitation, GroupMember, InvitationStatus};
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn insert(&self, group: &Group) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>>;

    /// Newest first
    async fn created_by(&self, user_id: &UserId) -> AppResult<Vec<Group>>;

    /// Groups the user is a member of, in joining order
    async fn groups_for_user(&self, user_id: &UserId) -> AppResult<Vec<Group>>;

    /// Case-insensitive substring match on the name
    async fn search_names(&self, query: &str, limit: usize) -> AppResult<Vec<Group>>;

    /// Returns false when the user already is a member
    async fn add_member(&self, member: &GroupMember) -> AppResult<bool>;

    /// In joining order
    async fn members(&self, group_id: Uuid) -> AppResult<Vec<GroupMember>>;

    async fn is_member(&self, group_id: Uuid, user_id: &UserId) -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Returns false when an invitation for this (group, invitee) exists already
    async fn insert_if_absent(&self, invitation: &GroupInvitation) -> AppResult<bool>;

    async fn find(&self, group_id: Uuid, invitee_id: &UserId)
        -> AppResult<Option<GroupInvitation>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> AppResult<GroupInvitation>;

    async fn pending_for(&self, invitee_id: &UserId) -> AppResult<Vec<GroupInvitation>>;
}
