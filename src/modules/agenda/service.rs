use chrono::NaiveDate;
use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{AgendaItem, AgendaRepository, AgendaStatus, GroupAgendaItem, Visit};
use crate::modules::group::GroupService;
use crate::modules::notification::{NotificationPayload, NotificationService};
use crate::modules::production::ProductionRepository;
use crate::shared::domain::Identity;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};

pub const PAST_VISITS_LIMIT: usize = 10;

pub struct AgendaService {
    agenda: Arc<dyn AgendaRepository>,
    productions: Arc<dyn ProductionRepository>,
    groups: Arc<GroupService>,
    notifications: Arc<NotificationService>,
}

impl AgendaService {
    pub fn new(
        agenda: Arc<dyn AgendaRepository>,
        productions: Arc<dyn ProductionRepository>,
        groups: Arc<GroupService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            agenda,
            productions,
            groups,
            notifications,
        }
    }

    /// Validate the raw visit fields and check the production exists
    async fn visit(
        &self,
        production_id: Uuid,
        venue: &str,
        date: &str,
        start_time: &str,
    ) -> AppResult<Visit> {
        let venue = venue.trim();
        if venue.is_empty() {
            return Err(AppError::ValidationError(
                "Venue cannot be empty".to_string(),
            ));
        }
        let date = Validator::parse_date(date)?;
        let start_time = Validator::parse_start_time(start_time)?;

        if self.productions.find_by_id(production_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Production {} not found",
                production_id
            )));
        }

        Ok(Visit {
            production_id,
            venue: venue.to_string(),
            date,
            start_time,
        })
    }

    pub async fn create_item(
        &self,
        identity: Option<&Identity>,
        production_id: Uuid,
        venue: &str,
        date: &str,
        start_time: &str,
        status: AgendaStatus,
    ) -> AppResult<AgendaItem> {
        let identity = Identity::require(identity)?;
        let visit = self.visit(production_id, venue, date, start_time).await?;

        let item = AgendaItem::new(identity.user_id.clone(), visit, status);
        self.agenda.insert_item(&item).await?;

        log_debug!("{} planned production {} on {}", identity.user_id, production_id, item.visit.date);
        Ok(item)
    }

    /// The caller's agenda, earliest first
    pub async fn agenda_for(&self, identity: Option<&Identity>) -> AppResult<Vec<AgendaItem>> {
        let identity = Identity::require(identity)?;
        let mut items = self.agenda.items_for(&identity.user_id).await?;
        items.sort_by_key(AgendaItem::starts_at);
        Ok(items)
    }

    /// Propose a visit to a group.
    ///
    /// Every member gets a planned item in their own agenda; everyone except
    /// the proposer is notified.
    pub async fn add_group_item(
        &self,
        identity: Option<&Identity>,
        group_id: Uuid,
        production_id: Uuid,
        venue: &str,
        date: &str,
        start_time: &str,
    ) -> AppResult<GroupAgendaItem> {
        let identity = Identity::require(identity)?;
        self.groups.get_group(group_id).await?;

        if !self.groups.is_member(group_id, &identity.user_id).await? {
            return Err(AppError::Unauthorized(
                "Only members can add to a group agenda".to_string(),
            ));
        }

        let visit = self.visit(production_id, venue, date, start_time).await?;
        let group_item = GroupAgendaItem::new(group_id, identity.user_id.clone(), visit);
        self.agenda.insert_group_item(&group_item).await?;

        let members = self.groups.members(group_id).await?;

        try_join_all(members.iter().map(|member| {
            let item = AgendaItem::new(
                member.clone(),
                group_item.visit.clone(),
                AgendaStatus::Planned,
            );
            async move { self.agenda.insert_item(&item).await }
        }))
        .await?;

        try_join_all(
            members
                .iter()
                .filter(|member| **member != identity.user_id)
                .map(|member| {
                    self.notifications.notify(
                        member,
                        NotificationPayload::EventProposal {
                            sender_id: identity.user_id.clone(),
                            group_id,
                            production_id,
                        },
                    )
                }),
        )
        .await?;

        log_info!(
            "{} proposed production {} to group {} ({} members)",
            identity.user_id,
            production_id,
            group_id,
            members.len()
        );
        Ok(group_item)
    }

    /// Group visits before `today`, most recent first
    pub async fn past_group_visits(
        &self,
        group_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<GroupAgendaItem>> {
        let mut past: Vec<GroupAgendaItem> = self
            .agenda
            .group_items(group_id)
            .await?
            .into_iter()
            .filter(|item| item.is_before(today))
            .collect();
        past.sort_by(|a, b| {
            (b.visit.date, b.visit.start_time).cmp(&(a.visit.date, a.visit.start_time))
        });
        past.truncate(PAST_VISITS_LIMIT);
        Ok(past)
    }

    pub async fn group_visit_count(&self, group_id: Uuid, today: NaiveDate) -> AppResult<usize> {
        Ok(self
            .agenda
            .group_items(group_id)
            .await?
            .iter()
            .filter(|item| item.is_before(today))
            .count())
    }
}
