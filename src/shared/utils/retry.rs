use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration for optimistic read-compute-write cycles
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_delay: Duration::from_millis(20),
            max_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// No waiting between attempts; used by tests and single-writer setups
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// Retry utility with exponential backoff
pub struct RetryUtil;

impl RetryUtil {
    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or `max_retries` extra attempts have been spent.
    ///
    /// Every attempt calls `operation` afresh, so state read inside it is
    /// never reused across attempts.
    pub async fn with_retry<F, Fut, T>(
        operation: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "{} succeeded on attempt {} after {} retries",
                            operation_name,
                            attempt + 1,
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                        return Err(error);
                    }

                    if attempt < config.max_retries {
                        let delay = Self::calculate_delay(attempt, config);
                        warn!(
                            "{} failed on attempt {} ({}), retrying in {:?}",
                            operation_name,
                            attempt + 1,
                            error,
                            delay
                        );
                        if !delay.is_zero() {
                            sleep(delay).await;
                        }
                    } else {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name,
                            attempt + 1,
                            error
                        );
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::InternalError("All retries exhausted".to_string())))
    }

    /// Calculate delay for the given attempt with exponential backoff and jitter
    pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
        let exponential_delay =
            config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32);

        let mut delay = Duration::from_millis(exponential_delay as u64);

        if delay > config.max_delay {
            delay = config.max_delay;
        }

        // Spread concurrent raters of the same production apart
        if config.jitter && !delay.is_zero() {
            let jitter_factor = 0.25;
            let jitter_ms =
                (delay.as_millis() as f64 * jitter_factor * rand::random::<f64>()) as u64;
            delay = Duration::from_millis(delay.as_millis() as u64 + jitter_ms);
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retries_conflicts_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = RetryUtil::with_retry(
            move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(AppError::ConcurrencyConflict("stale".into()))
                } else {
                    Ok(n)
                }
            },
            &RetryConfig::immediate(5),
            "test_op",
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_on_validation_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: AppResult<()> = RetryUtil::with_retry(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::ValidationError("bad".into()))
            },
            &RetryConfig::immediate(5),
            "test_op",
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: AppResult<()> = RetryUtil::with_retry(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::ConcurrencyConflict("stale".into()))
            },
            &RetryConfig::immediate(2),
            "test_op",
        )
        .await;

        assert!(matches!(result, Err(AppError::ConcurrencyConflict(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn delay_is_capped() {
        let config = RetryConfig {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(250),
            backoff_multiplier: 2.0,
            jitter: false,
        };
        assert_eq!(RetryUtil::calculate_delay(0, &config), Duration::from_millis(100));
        assert_eq!(RetryUtil::calculate_delay(5, &config), Duration::from_millis(250));
    }
}
