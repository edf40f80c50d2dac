use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaStatus {
    Planned,
    Confirmed,
    Canceled,
}

impl std::str::FromStr for AgendaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(AgendaStatus::Planned),
            "confirmed" => Ok(AgendaStatus::Confirmed),
            "canceled" => Ok(AgendaStatus::Canceled),
            _ => Err(format!("Invalid agenda status: {}", s)),
        }
    }
}

/// When and where a visit takes place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub production_id: Uuid,
    pub venue: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// A planned visit in one user's personal agenda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(flatten)]
    pub visit: Visit,
    pub status: AgendaStatus,
    pub created_at: DateTime<Utc>,
}

impl AgendaItem {
    pub fn new(user_id: UserId, visit: Visit, status: AgendaStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            visit,
            status,
            created_at: Utc::now(),
        }
    }

    /// Agenda order: date, then start time
    pub fn starts_at(&self) -> (NaiveDate, NaiveTime) {
        (self.visit.date, self.visit.start_time)
    }
}

/// A visit proposed to a whole group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAgendaItem {
    pub id: Uuid,
    pub group_id: Uuid,
    pub proposed_by: UserId,
    #[serde(flatten)]
    pub visit: Visit,
    pub created_at: DateTime<Utc>,
}

impl GroupAgendaItem {
    pub fn new(group_id: Uuid, proposed_by: UserId, visit: Visit) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            proposed_by,
            visit,
            created_at: Utc::now(),
        }
    }

    pub fn is_before(&self, day: NaiveDate) -> bool {
        self.visit.date < day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agenda_item_serializes_visit_inline() {
        let item = AgendaItem::new(
            UserId::from("u1"),
            Visit {
                production_id: Uuid::nil(),
                venue: "Stadsschouwburg".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                start_time: NaiveTime::from_hms_opt(20, 15, 0).unwrap(),
            },
            AgendaStatus::Planned,
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["venue"], "Stadsschouwburg");
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["status"], "planned");
    }

    #[test]
    fn status_parses_lowercase() {
        assert_eq!("canceled".parse::<AgendaStatus>(), Ok(AgendaStatus::Canceled));
        assert!("cancelled".parse::<AgendaStatus>().is_err());
    }
}
