use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Declined,
    Blocked,
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FriendshipStatus::Pending => write!(f, "pending"),
            FriendshipStatus::Accepted => write!(f, "accepted"),
            FriendshipStatus::Declined => write!(f, "declined"),
            FriendshipStatus::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(FriendshipStatus::Pending),
            "accepted" => Ok(FriendshipStatus::Accepted),
            "declined" => Ok(FriendshipStatus::Declined),
            "blocked" => Ok(FriendshipStatus::Blocked),
            _ => Err(format!("Invalid friendship status: {}", s)),
        }
    }
}

/// A friendship between two users, requested by `requester_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: Uuid,
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    pub fn request(requester_id: UserId, addressee_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requester_id,
            addressee_id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Order-independent key of the pair
    pub fn pair_key(a: &UserId, b: &UserId) -> (UserId, UserId) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }

    pub fn key(&self) -> (UserId, UserId) {
        Self::pair_key(&self.requester_id, &self.addressee_id)
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.requester_id == user_id || &self.addressee_id == user_id
    }

    /// The other side of the friendship as seen from `user_id`
    pub fn other(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.requester_id == user_id {
            Some(&self.addressee_id)
        } else if &self.addressee_id == user_id {
            Some(&self.requester_id)
        } else {
            None
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == FriendshipStatus::Accepted
    }

    pub fn set_status(&mut self, status: FriendshipStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
