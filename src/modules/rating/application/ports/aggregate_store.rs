use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::rating::domain::{RatingAggregate, VersionedAggregate};
use crate::shared::errors::AppResult;

/// Port for the stored rating aggregate of a production
///
/// Implementations must make `compare_and_swap` atomic: two writers holding
/// the same version can never both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Current aggregate and its version; `NotFound` for an unknown production
    async fn load(&self, production_id: Uuid) -> AppResult<VersionedAggregate>;

    /// Replace the aggregate if the stored version still equals `expected_version`.
    ///
    /// Returns the new version, or `ConcurrencyConflict` when another writer
    /// got there first.
    async fn compare_and_swap(
        &self,
        production_id: Uuid,
        expected_version: u64,
        aggregate: RatingAggregate,
    ) -> AppResult<u64>;
}
