use serde::{Deserialize, Serialize};

use super::UserId;
use crate::shared::errors::{AppError, AppResult};

/// Signed-in caller as propagated by the managed auth platform.
///
/// Authentication itself happens outside this crate; operations only ever
/// receive the already verified identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub picture_url: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            nickname: None,
            email: None,
            picture_url: None,
        }
    }

    pub fn with_profile(mut self, nickname: &str, email: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self.email = Some(email.to_string());
        self
    }

    /// Unwrap an optional identity or fail with `Unauthorized`
    pub fn require(identity: Option<&Identity>) -> AppResult<&Identity> {
        identity.ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_anonymous_callers() {
        assert!(matches!(
            Identity::require(None),
            Err(AppError::Unauthorized(_))
        ));

        let me = Identity::new("user_1");
        assert_eq!(Identity::require(Some(&me)).unwrap().user_id.as_str(), "user_1");
    }
}
