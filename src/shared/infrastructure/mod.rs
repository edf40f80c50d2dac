/// Shared infrastructure concerns
///
/// This module contains infrastructure implementations that are shared across
/// multiple bounded contexts (modules).
pub mod config;
pub mod database;

// Re-exports for convenience
pub use config::{AppConfig, ReconciliationConfig};
pub use database::{Database, DbConnection, DbPool};
