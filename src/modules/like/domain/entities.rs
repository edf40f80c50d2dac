use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::domain::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLike {
    pub production_id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl ProductionLike {
    pub fn new(production_id: Uuid, user_id: UserId) -> Self {
        Self {
            production_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
