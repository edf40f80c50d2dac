mod identity;
mod user_id;

pub use identity::Identity;
pub use user_id::UserId;
