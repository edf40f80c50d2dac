pub mod logger;
pub mod retry;
pub mod validation;

pub use logger::{init_logger, LogContext, TimedOperation};
pub use retry::{RetryConfig, RetryUtil};
pub use validation::Validator;
