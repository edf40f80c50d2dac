// Shared kernel: building blocks every bounded context depends on

pub mod application; // Shared application layer patterns
pub mod domain; // Identity and user ids
pub mod errors; // Shared error types
pub mod infrastructure; // Configuration and database pool
pub mod utils; // Logging, retry, validation

// Re-exports for convenience
pub use infrastructure::database::Database;
