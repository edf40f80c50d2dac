pub mod rate_production;

pub use rate_production::{RateProductionCommand, RateProductionHandler, RateProductionResult};
