/// Periodic rating reconciliation
///
/// Samples productions on a fixed interval and hands them to the
/// `RatingReconciler`. Runs until its cancellation token is cancelled.
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::reconciler::{RatingReconciler, ReconciliationReport};
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::config::ReconciliationConfig;
use crate::{log_error, log_info, log_warn};

pub struct ReconciliationWorker {
    reconciler: Arc<RatingReconciler>,
    interval: Duration,
    sample_size: usize,
    cancel: CancellationToken,
}

impl ReconciliationWorker {
    pub fn new(reconciler: Arc<RatingReconciler>, config: &ReconciliationConfig) -> Self {
        Self {
            reconciler,
            interval: config.interval,
            sample_size: config.sample_size,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn stop(&self) {
        log_info!("Rating reconciliation stop requested");
        self.cancel.cancel();
    }

    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Worker loop; the first pass runs immediately
    pub async fn run(self: Arc<Self>) {
        log_info!(
            "Rating reconciliation started (every {:?}, sample of {})",
            self.interval,
            self.sample_size
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    log_info!("Rating reconciliation stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        log_error!("Rating reconciliation pass failed: {}", e);
                    }
                }
            }
        }
    }

    pub async fn run_once(&self) -> AppResult<ReconciliationReport> {
        let report = self.reconciler.reconcile_sample(self.sample_size).await?;

        if !report.drifts.is_empty() {
            log_warn!(
                "Rating reconciliation found {} drifted aggregates ({} repaired)",
                report.drifts.len(),
                report.repaired()
            );
        }

        Ok(report)
    }
}
