use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupVisibility {
    Public,
    Private,
}

impl std::str::FromStr for GroupVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(GroupVisibility::Public),
            "private" => Ok(GroupVisibility::Private),
            _ => Err(format!("Invalid group visibility: {}", s)),
        }
    }
}

/// A circle of friends that goes to the theater together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: GroupVisibility,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(
        name: &str,
        description: Option<&str>,
        visibility: GroupVisibility,
        creator_id: UserId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            visibility,
            creator_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub group_id: Uuid,
    pub user_id: UserId,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn new(group_id: Uuid, user_id: UserId) -> Self {
        Self {
            group_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvitation {
    pub id: Uuid,
    pub group_id: Uuid,
    pub invitee_id: UserId,
    pub inviter_id: UserId,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupInvitation {
    pub fn new(group_id: Uuid, invitee_id: UserId, inviter_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            group_id,
            invitee_id,
            inviter_id,
            status: InvitationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    pub fn set_status(&mut self, status: InvitationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
