pub mod reconciler;
pub mod worker;

pub use reconciler::{RatingDrift, RatingReconciler, ReconciliationReport};
pub use worker::ReconciliationWorker;
