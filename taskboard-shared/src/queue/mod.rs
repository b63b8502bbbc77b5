/// Notification queue over Redis
///
/// - `client`: broker connection management
/// - `notifications`: the job descriptor and enqueue/pop operations
pub mod client;
pub mod notifications;

pub use client::{QueueClient, QueueClientError, QueueConfig};
pub use notifications::{NotificationJob, NotificationQueue, NotificationQueueError};
