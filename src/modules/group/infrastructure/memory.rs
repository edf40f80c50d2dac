use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::group::domain::{
    Group, GroupInvitation, GroupMember, GroupRepository, InvitationRepository, InvitationStatus,
};
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};

/// Groups in creation order plus per-group member lists
#[derive(Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<Vec<Group>>,
    members: DashMap<Uuid, Vec<GroupMember>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn insert(&self, group: &Group) -> AppResult<()> {
        self.groups.write().await.push(group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|g| g.id == id).cloned())
    }

    async fn created_by(&self, user_id: &UserId) -> AppResult<Vec<Group>> {
        let groups = self.groups.read().await;
        Ok(groups
            .iter()
            .rev()
            .filter(|g| &g.creator_id == user_id)
            .cloned()
            .collect())
    }

    async fn groups_for_user(&self, user_id: &UserId) -> AppResult<Vec<Group>> {
        let mut memberships: Vec<GroupMember> = self
            .members
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .iter()
                    .find(|m| &m.user_id == user_id)
                    .cloned()
            })
            .collect();
        memberships.sort_by_key(|m| m.joined_at);

        let groups = self.groups.read().await;
        Ok(memberships
            .iter()
            .filter_map(|m| groups.iter().find(|g| g.id == m.group_id).cloned())
            .collect())
    }

    async fn search_names(&self, query: &str, limit: usize) -> AppResult<Vec<Group>> {
        let needle = query.to_lowercase();
        let groups = self.groups.read().await;
        Ok(groups
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn add_member(&self, member: &GroupMember) -> AppResult<bool> {
        let mut members = self.members.entry(member.group_id).or_default();
        if members.iter().any(|m| m.user_id == member.user_id) {
            return Ok(false);
        }
        members.push(member.clone());
        Ok(true)
    }

    async fn members(&self, group_id: Uuid) -> AppResult<Vec<GroupMember>> {
        Ok(self
            .members
            .get(&group_id)
            .map(|members| members.clone())
            .unwrap_or_default())
    }

    async fn is_member(&self, group_id: Uuid, user_id: &UserId) -> AppResult<bool> {
        Ok(self
            .members
            .get(&group_id)
            .is_some_and(|members| members.iter().any(|m| &m.user_id == user_id)))
    }
}

/// Invitations keyed by (group, invitee)
#[derive(Default)]
pub struct InMemoryInvitationRepository {
    invitations: DashMap<(Uuid, UserId), GroupInvitation>,
}

impl InMemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn insert_if_absent(&self, invitation: &GroupInvitation) -> AppResult<bool> {
        let key = (invitation.group_id, invitation.invitee_id.clone());
        match self.invitations.entry(key) {
            Entry::Occupied(mut slot) => {
                // A declined invitation may be renewed
                if slot.get().status == InvitationStatus::Declined {
                    slot.insert(invitation.clone());
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(invitation.clone());
                Ok(true)
            }
        }
    }

    async fn find(
        &self,
        group_id: Uuid,
        invitee_id: &UserId,
    ) -> AppResult<Option<GroupInvitation>> {
        Ok(self
            .invitations
            .get(&(group_id, invitee_id.clone()))
            .map(|entry| entry.clone()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> AppResult<GroupInvitation> {
        let mut entry = self
            .invitations
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Invitation {} not found", id)))?;
        entry.set_status(status);
        Ok(entry.clone())
    }

    async fn pending_for(&self, invitee_id: &UserId) -> AppResult<Vec<GroupInvitation>> {
        let mut pending: Vec<GroupInvitation> = self
            .invitations
            .iter()
            .filter(|entry| &entry.invitee_id == invitee_id && entry.is_pending())
            .map(|entry| entry.clone())
            .collect();
        pending.sort_by_key(|i| i.created_at);
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::group::domain::GroupVisibility;

    #[tokio::test]
    async fn members_are_unique_per_group() {
        let repo = InMemoryGroupRepository::new();
        let group = Group::new("Club", None, GroupVisibility::Public, UserId::from("a"));
        repo.insert(&group).await.unwrap();

        let member = GroupMember::new(group.id, UserId::from("a"));
        assert!(repo.add_member(&member).await.unwrap());
        assert!(!repo.add_member(&member).await.unwrap());
        assert_eq!(repo.members(group.id).await.unwrap().len(), 1);
        assert!(repo.is_member(group.id, &UserId::from("a")).await.unwrap());
        assert!(!repo.is_member(group.id, &UserId::from("b")).await.unwrap());
    }

    #[tokio::test]
    async fn declined_invitation_can_be_renewed() {
        let repo = InMemoryInvitationRepository::new();
        let group_id = Uuid::new_v4();
        let first = GroupInvitation::new(group_id, UserId::from("b"), UserId::from("a"));

        assert!(repo.insert_if_absent(&first).await.unwrap());
        let again = GroupInvitation::new(group_id, UserId::from("b"), UserId::from("a"));
        assert!(!repo.insert_if_absent(&again).await.unwrap());

        repo.update_status(first.id, InvitationStatus::Declined)
            .await
            .unwrap();
        assert!(repo.insert_if_absent(&again).await.unwrap());
        assert_eq!(repo.pending_for(&UserId::from("b")).await.unwrap().len(), 1);
    }
}
