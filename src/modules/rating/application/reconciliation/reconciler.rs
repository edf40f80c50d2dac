use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::production::application::ports::ProductionRepository;
use crate::modules::rating::application::ports::{AggregateStore, RatingLedger};
use crate::modules::rating::domain::RatingAggregate;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::config::ReconciliationConfig;
use crate::shared::utils::logger::TimedOperation;
use crate::{log_debug, log_info, log_warn};

/// A production whose stored aggregate disagrees with its ratings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDrift {
    pub production_id: Uuid,
    pub stored: RatingAggregate,
    pub recomputed: RatingAggregate,
    pub repaired: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub checked: usize,
    pub drifts: Vec<RatingDrift>,
    /// Productions that could not be checked (missing or store errors)
    pub failed: usize,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.drifts.is_empty() && self.failed == 0
    }

    pub fn repaired(&self) -> usize {
        self.drifts.iter().filter(|d| d.repaired).count()
    }
}

/// Recomputes aggregates from the stored ratings and compares them with the
/// incrementally maintained ones.
pub struct RatingReconciler {
    aggregates: Arc<dyn AggregateStore>,
    ledger: Arc<dyn RatingLedger>,
    productions: Arc<dyn ProductionRepository>,
    tolerance: f64,
    repair: bool,
}

impl RatingReconciler {
    pub fn new(
        aggregates: Arc<dyn AggregateStore>,
        ledger: Arc<dyn RatingLedger>,
        productions: Arc<dyn ProductionRepository>,
        config: &ReconciliationConfig,
    ) -> Self {
        Self {
            aggregates,
            ledger,
            productions,
            tolerance: config.tolerance,
            repair: config.repair,
        }
    }

    pub async fn reconcile(&self, production_ids: &[Uuid]) -> AppResult<ReconciliationReport> {
        let timer = TimedOperation::new("rating_reconciliation");
        let mut report = ReconciliationReport::default();

        for &production_id in production_ids {
            match self.check(production_id).await {
                Ok(drift) => {
                    report.checked += 1;
                    if let Some(drift) = drift {
                        report.drifts.push(drift);
                    }
                }
                Err(e) => {
                    log_warn!("Could not reconcile production {}: {}", production_id, e);
                    report.failed += 1;
                }
            }
        }

        timer.finish_with_info(&format!(
            "{} checked, {} drifted, {} repaired, {} failed",
            report.checked,
            report.drifts.len(),
            report.repaired(),
            report.failed
        ));

        Ok(report)
    }

    /// Reconcile a random sample of at most `sample_size` productions
    pub async fn reconcile_sample(&self, sample_size: usize) -> AppResult<ReconciliationReport> {
        let all_ids = self.productions.list_ids().await?;

        let sample: Vec<Uuid> = {
            let mut rng = rand::thread_rng();
            all_ids
                .choose_multiple(&mut rng, sample_size)
                .copied()
                .collect()
        };

        log_debug!(
            "Reconciling {} of {} productions",
            sample.len(),
            all_ids.len()
        );

        self.reconcile(&sample).await
    }

    async fn check(&self, production_id: Uuid) -> AppResult<Option<RatingDrift>> {
        let stored = self.aggregates.load(production_id).await?;
        let ratings = self.ledger.ratings_for(production_id).await?;
        let recomputed = RatingAggregate::from_ratings(ratings);

        if !stored.aggregate.differs_from(&recomputed, self.tolerance) {
            return Ok(None);
        }

        log_warn!(
            "Rating drift on production {}: stored avg {:.6} over {}, ratings give avg {:.6} over {}",
            production_id,
            stored.aggregate.avg_rating,
            stored.aggregate.rating_count,
            recomputed.avg_rating,
            recomputed.rating_count
        );

        let mut repaired = false;
        if self.repair {
            match self
                .aggregates
                .compare_and_swap(production_id, stored.version, recomputed)
                .await
            {
                Ok(_) => {
                    log_info!("Repaired rating aggregate of production {}", production_id);
                    repaired = true;
                }
                // A rater got in between; the next run will look again
                Err(AppError::ConcurrencyConflict(_)) => {
                    log_debug!("Skipped repair of {}: aggregate moved", production_id);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Some(RatingDrift {
            production_id,
            stored: stored.aggregate,
            recomputed,
            repaired,
        }))
    }
}
