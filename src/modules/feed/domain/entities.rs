use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::domain::UserId;

/// Activity shown to a user's friends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FeedItemKind {
    #[serde(rename_all = "camelCase")]
    Review { production_id: Uuid, review_id: Uuid },
}

impl FeedItemKind {
    pub fn production_id(&self) -> Uuid {
        match self {
            FeedItemKind::Review { production_id, .. } => *production_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(flatten)]
    pub kind: FeedItemKind,
    pub created_at: DateTime<Utc>,
}

impl FeedItem {
    pub fn new(user_id: UserId, kind: FeedItemKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}
