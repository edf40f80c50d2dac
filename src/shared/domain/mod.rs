/// Shared domain concepts used by every bounded context
pub mod value_objects;

pub use value_objects::{Identity, UserId};
