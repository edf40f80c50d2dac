use std::sync::Arc;
use uuid::Uuid;

use super::domain::{
    ReactionKind, ReactionRepository, Review, ReviewRepository, ToggleAction, ToggleOutcome,
};
use crate::modules::feed::{FeedItemKind, FeedService};
use crate::modules::notification::{NotificationPayload, NotificationService};
use crate::modules::production::ProductionRepository;
use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_error, log_info, log_warn};

/// Reviews shown on a production page
pub const PRODUCTION_REVIEW_LIMIT: usize = 5;

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    reactions: Arc<dyn ReactionRepository>,
    productions: Arc<dyn ProductionRepository>,
    feed: Arc<FeedService>,
    notifications: Arc<NotificationService>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        reactions: Arc<dyn ReactionRepository>,
        productions: Arc<dyn ProductionRepository>,
        feed: Arc<FeedService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            reviews,
            reactions,
            productions,
            feed,
            notifications,
        }
    }

    /// Write or replace the caller's review text for a production.
    ///
    /// The first non-empty text counts towards the production's review count
    /// and shows up in friends' feeds.
    pub async fn write_review(
        &self,
        identity: Option<&Identity>,
        production_id: Uuid,
        text: &str,
    ) -> AppResult<Review> {
        let identity = Identity::require(identity)?;
        Validator::validate_review_text(text)?;

        if self.productions.find_by_id(production_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Production {} not found",
                production_id
            )));
        }

        let user_id = &identity.user_id;
        let mut review = self
            .reviews
            .find(production_id, user_id)
            .await?
            .unwrap_or_else(|| Review::visited(production_id, user_id.clone()));

        let had_text = review.has_text();
        review.set_text(text);
        self.reviews.save(&review).await?;

        if !had_text && review.has_text() {
            self.productions.increment_review_count(production_id).await?;
            self.feed
                .publish(
                    user_id,
                    FeedItemKind::Review {
                        production_id,
                        review_id: review.id,
                    },
                )
                .await?;
            log_info!("{} reviewed production {}", user_id, production_id);
        }

        Ok(review)
    }

    pub async fn reviews_for_production(&self, production_id: Uuid) -> AppResult<Vec<Review>> {
        self.reviews
            .for_production(production_id, PRODUCTION_REVIEW_LIMIT)
            .await
    }

    pub async fn reviews_by_user(&self, user_id: &UserId) -> AppResult<Vec<Review>> {
        self.reviews.by_user(user_id).await
    }

    pub async fn review_for(
        &self,
        production_id: Uuid,
        user_id: &UserId,
    ) -> AppResult<Option<Review>> {
        self.reviews.find(production_id, user_id).await
    }

    /// Add the caller's reaction of `kind`, or take it back if already given
    pub async fn toggle_reaction(
        &self,
        identity: Option<&Identity>,
        review_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<ToggleOutcome> {
        let identity = Identity::require(identity)?;
        let user_id = &identity.user_id;

        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;

        let added = self.reactions.toggle(review_id, user_id, kind).await?;
        let counts = match self
            .reviews
            .adjust_reaction_count(review_id, kind, added)
            .await
        {
            Ok(counts) => counts,
            Err(error) => {
                self.revert_toggle(review_id, user_id, kind).await;
                return Err(error);
            }
        };

        let action = if added {
            ToggleAction::Added
        } else {
            ToggleAction::Removed
        };
        log_debug!("{} {:?} {} on review {}", user_id, action, kind, review_id);

        if added && !review.is_written_by(user_id) {
            self.notifications
                .notify(
                    &review.user_id,
                    NotificationPayload::LikeReview {
                        sender_id: user_id.clone(),
                        review_id,
                        production_id: review.production_id,
                        reaction: kind,
                    },
                )
                .await?;
        }

        Ok(ToggleOutcome {
            action,
            kind,
            counts,
        })
    }

    /// Undo a reaction toggle whose counter update failed.
    ///
    /// When the undo fails as well the record and the per-kind count disagree
    /// until the reaction is toggled again.
    async fn revert_toggle(&self, review_id: Uuid, user_id: &UserId, kind: ReactionKind) {
        log_warn!(
            "Counting {} on review {} failed, reverting reaction of {}",
            kind,
            review_id,
            user_id
        );
        if let Err(error) = self.reactions.toggle(review_id, user_id, kind).await {
            log_error!(
                "Could not revert {} of {} on review {}: {}",
                kind,
                user_id,
                review_id,
                error
            );
        }
    }

    /// Reaction kinds the caller gave on a review; anonymous callers have none
    pub async fn reactions_by_user(
        &self,
        identity: Option<&Identity>,
        review_id: Uuid,
    ) -> AppResult<Vec<ReactionKind>> {
        match identity {
            Some(identity) => {
                self.reactions
                    .kinds_by_user(review_id, &identity.user_id)
                    .await
            }
            None => Ok(Vec::new()),
        }
    }
}
