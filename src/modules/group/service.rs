use std::sync::Arc;
use uuid::Uuid;

use super::domain::{
    Group, GroupInvitation, GroupMember, GroupRepository, GroupVisibility, InvitationRepository,
    InvitationStatus,
};
use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    invitations: Arc<dyn InvitationRepository>,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        invitations: Arc<dyn InvitationRepository>,
    ) -> Self {
        Self {
            groups,
            invitations,
        }
    }

    /// Create a group owned by the caller, who also becomes its first member
    pub async fn create_group(
        &self,
        identity: Option<&Identity>,
        name: &str,
        description: Option<&str>,
        visibility: GroupVisibility,
    ) -> AppResult<Group> {
        let identity = Identity::require(identity)?;
        Validator::validate_group_name(name)?;

        let group = Group::new(name, description, visibility, identity.user_id.clone());
        self.groups.insert(&group).await?;
        self.groups
            .add_member(&GroupMember::new(group.id, identity.user_id.clone()))
            .await?;

        log_info!("{} created group '{}' ({})", identity.user_id, group.name, group.id);
        Ok(group)
    }

    pub async fn get_group(&self, id: Uuid) -> AppResult<Group> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    pub async fn groups_created_by(&self, user_id: &UserId) -> AppResult<Vec<Group>> {
        self.groups.created_by(user_id).await
    }

    pub async fn groups_for_user(&self, user_id: &UserId) -> AppResult<Vec<Group>> {
        self.groups.groups_for_user(user_id).await
    }

    pub async fn member_count(&self, group_id: Uuid) -> AppResult<usize> {
        Ok(self.groups.members(group_id).await?.len())
    }

    pub async fn members(&self, group_id: Uuid) -> AppResult<Vec<UserId>> {
        Ok(self
            .groups
            .members(group_id)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect())
    }

    pub async fn is_member(&self, group_id: Uuid, user_id: &UserId) -> AppResult<bool> {
        self.groups.is_member(group_id, user_id).await
    }

    pub async fn add_member(&self, group_id: Uuid, user_id: &UserId) -> AppResult<()> {
        self.get_group(group_id).await?;

        if !self
            .groups
            .add_member(&GroupMember::new(group_id, user_id.clone()))
            .await?
        {
            return Err(AppError::Duplicate(format!(
                "{} is already a member of group {}",
                user_id, group_id
            )));
        }

        log_debug!("{} joined group {}", user_id, group_id);
        Ok(())
    }

    pub async fn search_names(&self, query: &str, limit: usize) -> AppResult<Vec<Group>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.groups.search_names(query, limit).await
    }

    /// Invite `invitee` into a group the caller belongs to
    pub async fn invite(
        &self,
        identity: Option<&Identity>,
        group_id: Uuid,
        invitee: &UserId,
    ) -> AppResult<GroupInvitation> {
        let identity = Identity::require(identity)?;
        self.get_group(group_id).await?;

        if !self.groups.is_member(group_id, &identity.user_id).await? {
            return Err(AppError::Unauthorized(
                "Only members can invite to a group".to_string(),
            ));
        }
        if self.groups.is_member(group_id, invitee).await? {
            return Err(AppError::Duplicate(format!(
                "{} is already a member of group {}",
                invitee, group_id
            )));
        }

        let invitation =
            GroupInvitation::new(group_id, invitee.clone(), identity.user_id.clone());
        if !self.invitations.insert_if_absent(&invitation).await? {
            return Err(AppError::Duplicate(format!(
                "{} already has an open invitation for group {}",
                invitee, group_id
            )));
        }

        log_info!("{} invited {} to group {}", identity.user_id, invitee, group_id);
        Ok(invitation)
    }

    pub async fn pending_invitations(
        &self,
        identity: Option<&Identity>,
    ) -> AppResult<Vec<GroupInvitation>> {
        let identity = Identity::require(identity)?;
        self.invitations.pending_for(&identity.user_id).await
    }

    /// Accept or decline the caller's invitation; accepting joins the group
    pub async fn respond_to_invitation(
        &self,
        identity: Option<&Identity>,
        group_id: Uuid,
        status: InvitationStatus,
    ) -> AppResult<GroupInvitation> {
        let identity = Identity::require(identity)?;

        if status == InvitationStatus::Pending {
            return Err(AppError::ValidationError(
                "An invitation can only be accepted or declined".to_string(),
            ));
        }

        let invitation = self
            .invitations
            .find(group_id, &identity.user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No invitation to group {} for {}",
                    group_id, identity.user_id
                ))
            })?;

        let updated = self
            .invitations
            .update_status(invitation.id, status)
            .await?;

        if status == InvitationStatus::Accepted {
            // Already being a member is fine here
            self.groups
                .add_member(&GroupMember::new(group_id, identity.user_id.clone()))
                .await?;
        }

        log_debug!(
            "{} responded {:?} to invitation for group {}",
            identity.user_id,
            status,
            group_id
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::group::domain::MockGroupRepository;
    use crate::modules::group::infrastructure::{
        InMemoryGroupRepository, InMemoryInvitationRepository,
    };

    fn service() -> GroupService {
        GroupService::new(
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(InMemoryInvitationRepository::new()),
        )
    }

    async fn group(service: &GroupService, creator: &str) -> Group {
        service
            .create_group(
                Some(&Identity::new(creator)),
                "Toneelvrienden",
                Some("Elke maand een voorstelling"),
                GroupVisibility::Private,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn creator_becomes_member() {
        let service = service();
        let group = group(&service, "creator").await;

        assert_eq!(service.member_count(group.id).await.unwrap(), 1);
        assert_eq!(
            service.members(group.id).await.unwrap(),
            vec![UserId::from("creator")]
        );
        assert_eq!(
            service
                .groups_created_by(&UserId::from("creator"))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn invalid_names_are_rejected() {
        let service = service();
        let result = service
            .create_group(
                Some(&Identity::new("creator")),
                "<script>",
                None,
                GroupVisibility::Public,
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn accepted_invitation_joins_group() {
        let service = service();
        let group = group(&service, "creator").await;
        let guest = Identity::new("guest");

        service
            .invite(Some(&Identity::new("creator")), group.id, &guest.user_id)
            .await
            .unwrap();
        assert_eq!(service.pending_invitations(Some(&guest)).await.unwrap().len(), 1);

        let accepted = service
            .respond_to_invitation(Some(&guest), group.id, InvitationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.status, InvitationStatus::Accepted);
        assert!(service.is_member(group.id, &guest.user_id).await.unwrap());

        let groups = service.groups_for_user(&guest.user_id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, group.id);
    }

    #[tokio::test]
    async fn declined_invitation_does_not_join() {
        let service = service();
        let group = group(&service, "creator").await;
        let guest = Identity::new("guest");

        service
            .invite(Some(&Identity::new("creator")), group.id, &guest.user_id)
            .await
            .unwrap();
        service
            .respond_to_invitation(Some(&guest), group.id, InvitationStatus::Declined)
            .await
            .unwrap();

        assert!(!service.is_member(group.id, &guest.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn responding_without_invitation_is_not_found() {
        let service = service();
        let group = group(&service, "creator").await;

        let result = service
            .respond_to_invitation(
                Some(&Identity::new("stranger")),
                group.id,
                InvitationStatus::Accepted,
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn only_members_invite() {
        let service = service();
        let group = group(&service, "creator").await;

        let result = service
            .invite(Some(&Identity::new("outsider")), group.id, &UserId::from("x"))
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let duplicate = service
            .invite(
                Some(&Identity::new("creator")),
                group.id,
                &UserId::from("creator"),
            )
            .await;
        assert!(matches!(duplicate, Err(AppError::Duplicate(_))));
    }

    #[tokio::test]
    async fn blank_search_skips_repository() {
        let mut repo = MockGroupRepository::new();
        repo.expect_search_names().never();

        let service = GroupService::new(Arc::new(repo), Arc::new(InMemoryInvitationRepository::new()));
        assert!(service.search_names("   ", 5).await.unwrap().is_empty());
    }
}
