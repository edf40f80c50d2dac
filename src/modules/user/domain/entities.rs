use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};

/// Profile mirrored from the auth platform on first sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub email: String,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_identity(identity: &Identity) -> AppResult<Self> {
        let nickname = identity
            .nickname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::ValidationError("Identity has no nickname".to_string()))?;
        let email = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::ValidationError("Identity has no email".to_string()))?;

        Ok(Self {
            id: identity.user_id.clone(),
            nickname: nickname.to_string(),
            email: email.to_string(),
            picture_url: identity.picture_url.clone(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_without_profile_is_rejected() {
        let bare = Identity::new("u1");
        assert!(matches!(
            User::from_identity(&bare),
            Err(AppError::ValidationError(_))
        ));

        let user = User::from_identity(&bare.with_profile("  Anna ", "anna@example.org")).unwrap();
        assert_eq!(user.nickname, "Anna");
        assert_eq!(user.id.as_str(), "u1");
    }
}
