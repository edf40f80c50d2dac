/// Notifications for friend requests, review reactions and group proposals
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-exports for easy access
pub use domain::{Notification, NotificationPayload, NotificationRepository};
pub use infrastructure::InMemoryNotificationRepository;
pub use service::NotificationService;
