mod command;
mod handler;
mod result;

pub use command::RateProductionCommand;
pub use handler::RateProductionHandler;
pub use result::RateProductionResult;
