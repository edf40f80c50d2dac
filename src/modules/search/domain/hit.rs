use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::group::Group;
use crate::modules::production::Production;
use crate::modules::user::User;
use crate::shared::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Production,
    User,
    Group,
}

/// One row of the combined search dropdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchHit {
    #[serde(rename_all = "camelCase")]
    Production {
        id: Uuid,
        title: String,
        producer: String,
        start_date: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    User {
        id: UserId,
        nickname: String,
        picture_url: Option<String>,
        mutual_friends: usize,
    },
    #[serde(rename_all = "camelCase")]
    Group {
        id: Uuid,
        name: String,
        description: Option<String>,
    },
}

impl SearchHit {
    pub fn user(user: User, mutual_friends: usize) -> Self {
        SearchHit::User {
            id: user.id,
            nickname: user.nickname,
            picture_url: user.picture_url,
            mutual_friends,
        }
    }

    pub fn kind(&self) -> HitKind {
        match self {
            SearchHit::Production { .. } => HitKind::Production,
            SearchHit::User { .. } => HitKind::User,
            SearchHit::Group { .. } => HitKind::Group,
        }
    }

    /// Identity for de-duplication
    pub fn key(&self) -> (HitKind, String) {
        let id = match self {
            SearchHit::Production { id, .. } | SearchHit::Group { id, .. } => id.to_string(),
            SearchHit::User { id, .. } => id.to_string(),
        };
        (self.kind(), id)
    }

    /// The text matched against the query
    pub fn label(&self) -> &str {
        match self {
            SearchHit::Production { title, .. } => title,
            SearchHit::User { nickname, .. } => nickname,
            SearchHit::Group { name, .. } => name,
        }
    }

    pub fn mutual_friends(&self) -> usize {
        match self {
            SearchHit::User { mutual_friends, .. } => *mutual_friends,
            _ => 0,
        }
    }
}

impl From<Production> for SearchHit {
    fn from(production: Production) -> Self {
        SearchHit::Production {
            id: production.id,
            title: production.title,
            producer: production.producer,
            start_date: production.start_date,
        }
    }
}

impl From<Group> for SearchHit {
    fn from(group: Group) -> Self {
        SearchHit::Group {
            id: group.id,
            name: group.name,
            description: group.description,
        }
    }
}
