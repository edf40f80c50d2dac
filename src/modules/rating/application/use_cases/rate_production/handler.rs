use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::rating::application::ports::{AggregateStore, UserRatingStore};
use crate::modules::rating::domain::{services::apply, RatingAggregate, StarRating};
use crate::shared::{
    application::use_case::UseCase,
    errors::{AppError, AppResult},
    utils::{
        logger::LogContext,
        retry::{RetryConfig, RetryUtil},
    },
};
use crate::{log_debug, log_error, log_warn};

use super::{command::RateProductionCommand, result::RateProductionResult};

/// Applies a rating click to the production aggregate and the user's review.
///
/// Each attempt reads the aggregate and the user's previous rating afresh,
/// computes the new aggregate and writes it with a compare-and-swap on the
/// version it read. A lost race surfaces as `ConcurrencyConflict` and the
/// whole cycle is retried with backoff.
pub struct RateProductionHandler {
    aggregates: Arc<dyn AggregateStore>,
    user_ratings: Arc<dyn UserRatingStore>,
    retry: RetryConfig,
}

impl RateProductionHandler {
    pub fn new(
        aggregates: Arc<dyn AggregateStore>,
        user_ratings: Arc<dyn UserRatingStore>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            aggregates,
            user_ratings,
            retry,
        }
    }

    async fn attempt(
        &self,
        command: &RateProductionCommand,
        requested: StarRating,
    ) -> AppResult<RateProductionResult> {
        let production_id = command.production_id;

        let current = self.aggregates.load(production_id).await?;
        let previous = self
            .user_ratings
            .load_user_rating(&command.user_id, production_id)
            .await?;

        let applied = apply(current.aggregate, previous, requested);

        if applied.change.is_unchanged() {
            log_debug!(
                "Rating click by {} on {} changes nothing",
                command.user_id,
                production_id
            );
            return Ok(RateProductionResult {
                production_id,
                change: applied.change,
                user_rating: previous,
                aggregate: current.aggregate,
                version: current.version,
            });
        }

        let version = self
            .aggregates
            .compare_and_swap(production_id, current.version, applied.aggregate)
            .await?;

        let user_rating = applied.change.user_rating();
        if let Err(error) = self
            .user_ratings
            .save_user_rating(&command.user_id, production_id, user_rating)
            .await
        {
            self.compensate(production_id, version, current.aggregate)
                .await?;
            return Err(error);
        }

        LogContext::rating_change(
            &production_id.to_string(),
            applied.change.label(),
            applied.aggregate.avg_rating,
            applied.aggregate.rating_count,
        );

        Ok(RateProductionResult {
            production_id,
            change: applied.change,
            user_rating,
            aggregate: applied.aggregate,
            version,
        })
    }

    /// Put the aggregate back after the user-rating write failed.
    ///
    /// If that fails too the stored aggregate counts a rating that was never
    /// recorded; the error is made non-retryable so the click is not applied
    /// a second time on top of it.
    async fn compensate(
        &self,
        production_id: Uuid,
        written_version: u64,
        previous: RatingAggregate,
    ) -> AppResult<()> {
        log_warn!(
            "Saving user rating for {} failed, restoring aggregate",
            production_id
        );

        match self
            .aggregates
            .compare_and_swap(production_id, written_version, previous)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) => {
                log_error!(
                    "Could not restore aggregate of production {}: {}; left for reconciliation",
                    production_id,
                    error
                );
                Err(AppError::InternalError(format!(
                    "Rating aggregate of production {} may have drifted: {}",
                    production_id, error
                )))
            }
        }
    }
}

#[async_trait]
impl UseCase<RateProductionCommand, RateProductionResult> for RateProductionHandler {
    async fn execute(&self, command: RateProductionCommand) -> AppResult<RateProductionResult> {
        // Validate before touching any store
        let requested = StarRating::new(command.stars)?;
        let command = &command;

        RetryUtil::with_retry(
            move || self.attempt(command, requested),
            &self.retry,
            "rate_production",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::rating::application::ports::{MockAggregateStore, MockUserRatingStore};
    use crate::modules::rating::domain::{RatingChange, VersionedAggregate};
    use mockall::predicate::{always, eq};
    use mockall::Sequence;

    fn star(value: i64) -> StarRating {
        StarRating::new(value).unwrap()
    }

    fn handler(
        aggregates: MockAggregateStore,
        user_ratings: MockUserRatingStore,
        retries: u32,
    ) -> RateProductionHandler {
        RateProductionHandler::new(
            Arc::new(aggregates),
            Arc::new(user_ratings),
            RetryConfig::immediate(retries),
        )
    }

    #[tokio::test]
    async fn first_rating_writes_aggregate_then_user_rating() {
        let production_id = Uuid::new_v4();
        let mut aggregates = MockAggregateStore::new();
        let mut user_ratings = MockUserRatingStore::new();

        aggregates
            .expect_load()
            .with(eq(production_id))
            .times(1)
            .returning(|_| Ok(VersionedAggregate::new(RatingAggregate::EMPTY, 3)));
        user_ratings
            .expect_load_user_rating()
            .times(1)
            .returning(|_, _| Ok(StarRating::NONE));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(3), eq(RatingAggregate::new(4.0, 1)))
            .times(1)
            .returning(|_, _, _| Ok(4));
        user_ratings
            .expect_save_user_rating()
            .with(always(), eq(production_id), eq(star(4)))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = handler(aggregates, user_ratings, 3)
            .execute(RateProductionCommand::new("user_1", production_id, 4))
            .await
            .unwrap();

        assert_eq!(result.change, RatingChange::First { rating: star(4) });
        assert_eq!(result.aggregate, RatingAggregate::new(4.0, 1));
        assert_eq!(result.version, 4);
    }

    #[tokio::test]
    async fn conflict_rereads_before_recomputing() {
        let production_id = Uuid::new_v4();
        let mut seq = Sequence::new();
        let mut aggregates = MockAggregateStore::new();
        let mut user_ratings = MockUserRatingStore::new();

        user_ratings
            .expect_load_user_rating()
            .times(2)
            .returning(|_, _| Ok(StarRating::NONE));

        // First attempt sees an empty production and loses the race
        aggregates
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(VersionedAggregate::new(RatingAggregate::EMPTY, 0)));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(0), always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(AppError::ConcurrencyConflict("stale".into())));

        // Second attempt must build on the winner's aggregate
        aggregates
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(VersionedAggregate::new(RatingAggregate::new(2.0, 1), 1)));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(1), eq(RatingAggregate::new(3.0, 2)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(2));

        user_ratings
            .expect_save_user_rating()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = handler(aggregates, user_ratings, 3)
            .execute(RateProductionCommand::new("user_2", production_id, 4))
            .await
            .unwrap();

        assert_eq!(result.aggregate, RatingAggregate::new(3.0, 2));
        assert_eq!(result.version, 2);
    }

    #[tokio::test]
    async fn failed_user_rating_write_restores_aggregate() {
        let production_id = Uuid::new_v4();
        let before = RatingAggregate::new(3.0, 2);
        let mut aggregates = MockAggregateStore::new();
        let mut user_ratings = MockUserRatingStore::new();

        aggregates
            .expect_load()
            .times(1)
            .returning(move |_| Ok(VersionedAggregate::new(before, 7)));
        user_ratings
            .expect_load_user_rating()
            .times(1)
            .returning(|_, _| Ok(StarRating::NONE));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(7), always())
            .times(1)
            .returning(|_, _, _| Ok(8));
        user_ratings
            .expect_save_user_rating()
            .times(1)
            .returning(|_, _, _| Err(AppError::DatabaseError("connection reset".into())));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(8), eq(before))
            .times(1)
            .returning(|_, _, _| Ok(9));

        let result = handler(aggregates, user_ratings, 0)
            .execute(RateProductionCommand::new("user_3", production_id, 5))
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn failed_compensation_is_not_retried() {
        let production_id = Uuid::new_v4();
        let mut aggregates = MockAggregateStore::new();
        let mut user_ratings = MockUserRatingStore::new();

        aggregates
            .expect_load()
            .times(1)
            .returning(|_| Ok(VersionedAggregate::new(RatingAggregate::new(4.0, 1), 1)));
        user_ratings
            .expect_load_user_rating()
            .times(1)
            .returning(|_, _| Ok(star(4)));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(1), always())
            .times(1)
            .returning(|_, _, _| Ok(2));
        user_ratings
            .expect_save_user_rating()
            .times(1)
            .returning(|_, _, _| Err(AppError::DatabaseError("timeout".into())));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(2), always())
            .times(1)
            .returning(|_, _, _| Err(AppError::ConcurrencyConflict("moved on".into())));

        let result = handler(aggregates, user_ratings, 5)
            .execute(RateProductionCommand::new("user_4", production_id, 4))
            .await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn invalid_stars_touch_nothing() {
        let result = handler(MockAggregateStore::new(), MockUserRatingStore::new(), 3)
            .execute(RateProductionCommand::new("user_5", Uuid::new_v4(), 6))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn unknown_production_is_not_retried() {
        let mut aggregates = MockAggregateStore::new();
        aggregates
            .expect_load()
            .times(1)
            .returning(|id| Err(AppError::NotFound(format!("Production {} not found", id))));

        let result = handler(aggregates, MockUserRatingStore::new(), 3)
            .execute(RateProductionCommand::new("user_6", Uuid::new_v4(), 3))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn clearing_a_rating_persists_zero() {
        let production_id = Uuid::new_v4();
        let mut aggregates = MockAggregateStore::new();
        let mut user_ratings = MockUserRatingStore::new();

        aggregates
            .expect_load()
            .returning(|_| Ok(VersionedAggregate::new(RatingAggregate::new(5.0, 1), 4)));
        user_ratings
            .expect_load_user_rating()
            .returning(|_, _| Ok(star(5)));
        aggregates
            .expect_compare_and_swap()
            .with(eq(production_id), eq(4), eq(RatingAggregate::EMPTY))
            .times(1)
            .returning(|_, _, _| Ok(5));
        user_ratings
            .expect_save_user_rating()
            .with(always(), eq(production_id), eq(StarRating::NONE))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = handler(aggregates, user_ratings, 0)
            .execute(RateProductionCommand::new("user_7", production_id, 5))
            .await
            .unwrap();

        assert_eq!(result.user_rating, StarRating::NONE);
        assert_eq!(result.aggregate, RatingAggregate::EMPTY);
    }
}
