use async_trait::async_trait;
use futures::future::try_join_all;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use super::domain::{similarity, SearchHit};
use crate::modules::group::GroupService;
use crate::modules::production::ProductionService;
use crate::modules::social::SocialService;
use crate::modules::user::{User, UserService};
use crate::shared::application::Query;
use crate::shared::domain::Identity;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation};

/// Results fetched per kind
pub const RESULTS_PER_KIND: usize = 5;

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub identity: Option<Identity>,
    pub text: String,
}

impl SearchQuery {
    pub fn new(identity: Option<Identity>, text: impl Into<String>) -> Self {
        Self {
            identity,
            text: text.into(),
        }
    }
}

/// Combined search over productions, people and groups
pub struct SearchAggregator {
    productions: Arc<ProductionService>,
    users: Arc<UserService>,
    groups: Arc<GroupService>,
    social: Arc<SocialService>,
}

impl SearchAggregator {
    pub fn new(
        productions: Arc<ProductionService>,
        users: Arc<UserService>,
        groups: Arc<GroupService>,
        social: Arc<SocialService>,
    ) -> Self {
        Self {
            productions,
            users,
            groups,
            social,
        }
    }

    async fn user_hits(
        &self,
        identity: Option<&Identity>,
        users: Vec<User>,
    ) -> AppResult<Vec<SearchHit>> {
        let Some(caller) = identity else {
            return Ok(users.into_iter().map(|u| SearchHit::user(u, 0)).collect());
        };

        let counts = try_join_all(
            users
                .iter()
                .map(|user| self.social.mutual_friends(&caller.user_id, &user.id)),
        )
        .await?;

        Ok(users
            .into_iter()
            .zip(counts)
            .map(|(user, mutual)| SearchHit::user(user, mutual))
            .collect())
    }
}

/// Best title match first; among equals, more mutual friends first
fn rank(query: &str, hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| {
        let by_similarity = similarity(query, b.label())
            .partial_cmp(&similarity(query, a.label()))
            .unwrap_or(Ordering::Equal);
        by_similarity.then_with(|| b.mutual_friends().cmp(&a.mutual_friends()))
    });
}

#[async_trait]
impl Query<SearchQuery, Vec<SearchHit>> for SearchAggregator {
    async fn execute(&self, query: SearchQuery) -> AppResult<Vec<SearchHit>> {
        let text = query.text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let timer = TimedOperation::new("multi_search");
        let identity = query.identity.as_ref();

        let (productions, users, groups) = tokio::try_join!(
            self.productions.search_titles(text, RESULTS_PER_KIND),
            self.users.search_users(identity, text, RESULTS_PER_KIND),
            self.groups.search_names(text, RESULTS_PER_KIND),
        )?;

        let mut production_hits: Vec<SearchHit> =
            productions.into_iter().map(SearchHit::from).collect();
        let mut user_hits = self.user_hits(identity, users).await?;
        let mut group_hits: Vec<SearchHit> = groups.into_iter().map(SearchHit::from).collect();

        rank(text, &mut production_hits);
        rank(text, &mut user_hits);
        rank(text, &mut group_hits);

        let caller = identity.map(|i| i.user_id.to_string());
        let mut seen = HashSet::new();
        let hits: Vec<SearchHit> = production_hits
            .into_iter()
            .chain(user_hits)
            .chain(group_hits)
            .filter(|hit| match (hit, caller.as_deref()) {
                (SearchHit::User { id, .. }, Some(caller)) => id.as_str() != caller,
                _ => true,
            })
            .filter(|hit| seen.insert(hit.key()))
            .collect();

        LogContext::search_operation(text, Some("multi"), Some(hits.len()));
        timer.finish();
        Ok(hits)
    }
}
