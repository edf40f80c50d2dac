use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::review::domain::ReactionKind;
use crate::shared::domain::UserId;

/// What a notification is about; every kind carries its own typed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NotificationPayload {
    #[serde(rename_all = "camelCase")]
    FriendRequest { sender_id: UserId },
    #[serde(rename_all = "camelCase")]
    LikeReview {
        sender_id: UserId,
        review_id: Uuid,
        production_id: Uuid,
        reaction: ReactionKind,
    },
    #[serde(rename_all = "camelCase")]
    EventProposal {
        sender_id: UserId,
        group_id: Uuid,
        production_id: Uuid,
    },
}

impl NotificationPayload {
    pub fn sender_id(&self) -> &UserId {
        match self {
            NotificationPayload::FriendRequest { sender_id }
            | NotificationPayload::LikeReview { sender_id, .. }
            | NotificationPayload::EventProposal { sender_id, .. } => sender_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NotificationPayload::FriendRequest { .. } => "friend_request",
            NotificationPayload::LikeReview { .. } => "like_review",
            NotificationPayload::EventProposal { .. } => "event_proposal",
        }
    }

    pub fn is_friend_request_from(&self, sender: &UserId) -> bool {
        matches!(self, NotificationPayload::FriendRequest { sender_id } if sender_id == sender)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: UserId,
    #[serde(flatten)]
    pub payload: NotificationPayload,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(recipient_id: UserId, payload: NotificationPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            payload,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
