/// Reviews and the reactions other users leave on them
///
/// A review record exists per (user, production) as soon as the user rates
/// or marks the production visited; the written text is optional.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::modules::rating::domain::StarRating;
use crate::shared::domain::UserId;

/// The closed set of reactions a review can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    ThumbsUp,
    ThumbsDown,
    Heart,
    Smile,
    Celebration,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 5] = [
        ReactionKind::ThumbsUp,
        ReactionKind::ThumbsDown,
        ReactionKind::Heart,
        ReactionKind::Smile,
        ReactionKind::Celebration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "thumbs_up",
            ReactionKind::ThumbsDown => "thumbs_down",
            ReactionKind::Heart => "heart",
            ReactionKind::Smile => "smile",
            ReactionKind::Celebration => "celebration",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Invalid reaction type: {}", s))
    }
}

/// Per-kind reaction totals of a review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionCounts(BTreeMap<ReactionKind, u32>);

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        *self.0.entry(kind).or_insert(0) += 1;
    }

    /// Never goes below zero
    pub fn decrement(&mut self, kind: ReactionKind) {
        let count = self.0.entry(kind).or_insert(0);
        *count = count.saturating_sub(1);
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub production_id: Uuid,
    pub user_id: UserId,
    pub visited: bool,
    pub rating: StarRating,
    pub text: Option<String>,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Record created on the user's first interaction with a production
    pub fn visited(production_id: Uuid, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            production_id,
            user_id,
            visited: true,
            rating: StarRating::NONE,
            text: None,
            reactions: ReactionCounts::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn set_rating(&mut self, rating: StarRating) {
        self.rating = rating;
        self.updated_at = Utc::now();
    }

    /// Blank text clears the review
    pub fn set_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.updated_at = Utc::now();
    }

    pub fn is_written_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// One user's reaction of one kind on one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub review_id: Uuid,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    pub kind: ReactionKind,
    pub counts: ReactionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_kinds_parse_their_wire_names() {
        for kind in ReactionKind::ALL {
            assert_eq!(kind.as_str().parse::<ReactionKind>().unwrap(), kind);
        }
        assert!("applause".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn counts_floor_at_zero() {
        let mut counts = ReactionCounts::default();
        counts.decrement(ReactionKind::Heart);
        assert_eq!(counts.get(ReactionKind::Heart), 0);

        counts.increment(ReactionKind::Heart);
        counts.increment(ReactionKind::Smile);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn counts_serialize_as_object() {
        let mut counts = ReactionCounts::default();
        counts.increment(ReactionKind::ThumbsUp);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["thumbs_up"], 1);
    }

    #[test]
    fn blank_text_is_not_a_review() {
        let mut review = Review::visited(Uuid::new_v4(), UserId::from("u1"));
        assert!(!review.has_text());
        review.set_text("  Prachtige regie  ");
        assert_eq!(review.text.as_deref(), Some("Prachtige regie"));
        review.set_text("   ");
        assert!(!review.has_text());
    }
}
