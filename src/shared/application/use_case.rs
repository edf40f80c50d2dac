//! Command and query handler traits shared by the bounded contexts.
//!
//! A handler owns its ports as `Arc<dyn Port>` and exposes a single
//! `execute` entry point:
//!
//! ```rust,ignore
//! #[async_trait]
//! impl UseCase<RateProductionCommand, RateProductionResult> for RateProductionHandler {
//!     async fn execute(&self, command: RateProductionCommand) -> AppResult<RateProductionResult> {
//!         // load, compute, persist
//!     }
//! }
//! ```
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// State-changing handler
#[async_trait]
pub trait UseCase<TCommand, TResult> {
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}

/// Read-only handler
#[async_trait]
pub trait Query<TQuery, TResult> {
    async fn execute(&self, query: TQuery) -> AppResult<TResult>;
}
