/// Combined search over productions, people and groups
pub mod domain;
pub mod service;

// Re-exports for easy access
pub use domain::{HitKind, SearchHit};
pub use service::{SearchAggregator, SearchQuery};
