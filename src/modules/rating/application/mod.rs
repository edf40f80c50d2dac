pub mod ports;
pub mod reconciliation;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{AggregateStore, RatingLedger, UserRatingStore};
pub use reconciliation::{RatingReconciler, ReconciliationReport, ReconciliationWorker};
pub use use_cases::{RateProductionCommand, RateProductionHandler, RateProductionResult};
