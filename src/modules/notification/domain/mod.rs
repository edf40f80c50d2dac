pub mod entities;
pub mod repository;

pub use entities::{Notification, NotificationPayload};
pub use repository::NotificationRepository;
