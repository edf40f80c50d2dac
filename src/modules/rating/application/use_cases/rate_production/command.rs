use uuid::Uuid;

use crate::shared::domain::UserId;

/// A user clicked `stars` on a production; clicking their current value clears it
#[derive(Debug, Clone)]
pub struct RateProductionCommand {
    pub user_id: UserId,
    pub production_id: Uuid,
    pub stars: i64,
}

impl RateProductionCommand {
    pub fn new(user_id: impl Into<UserId>, production_id: Uuid, stars: i64) -> Self {
        Self {
            user_id: user_id.into(),
            production_id,
            stars,
        }
    }
}
