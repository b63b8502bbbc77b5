/// Notification job queue
///
/// Jobs are JSON documents on a single Redis list: the API server LPUSHes
/// on task mutations and the worker BRPOPs them off. Enqueue returns as
/// soon as the broker acks — fire-and-forget, at-most-once, no ordering
/// guarantee between jobs enqueued in quick succession.
///
/// # Architecture
///
/// ```text
/// API handler
///     │ enqueue()            (LPUSH taskboard:notifications)
///     ▼
/// Redis list ──────────────▶ worker pop() (BRPOP) ──▶ SMTP delivery
/// ```
///
/// The recipient is carried as a user id, not an address: the worker
/// resolves the email at delivery time, so a user deleted between
/// enqueue and delivery makes the job a silent no-op.

use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::client::{QueueClient, QueueClientError};

/// Redis list the jobs travel on
const NOTIFICATIONS_KEY: &str = "taskboard:notifications";

/// Notification queue errors
#[derive(Debug, Error)]
pub enum NotificationQueueError {
    /// Broker error
    #[error("Broker error: {0}")]
    Broker(#[from] QueueClientError),

    /// Raw command error
    #[error("Broker command error: {0}")]
    Command(#[from] redis::RedisError),

    /// Job payload could not be (de)serialized
    #[error("Job serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A queued notification
///
/// `user_id` may be `None`: a task update whose new assignee is empty
/// still enqueues a job, and the worker treats the missing recipient as
/// a delivery-time no-op rather than suppressing the enqueue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationJob {
    /// Title of the task the notification is about
    pub task_title: String,

    /// Recipient user, if any
    pub user_id: Option<Uuid>,

    /// What happened: "Assigned" on create, the new status string on
    /// update
    pub action: String,
}

/// Handle for enqueueing and consuming notification jobs
#[derive(Clone)]
pub struct NotificationQueue {
    client: QueueClient,
    key: String,
}

impl NotificationQueue {
    /// Creates a queue handle on the default list
    pub fn new(client: QueueClient) -> Self {
        Self {
            client,
            key: NOTIFICATIONS_KEY.to_string(),
        }
    }

    /// Creates a queue handle on a custom list key (used by tests)
    pub fn with_key(client: QueueClient, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }

    /// Enqueues a job and returns once the broker acks
    ///
    /// The caller's request never waits on delivery; failures here are
    /// the caller's to log and swallow, per the fire-and-forget
    /// contract.
    pub async fn enqueue(&self, job: &NotificationJob) -> Result<(), NotificationQueueError> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.client.connection();
        conn.lpush::<_, _, ()>(&self.key, payload).await?;

        tracing::debug!(action = %job.action, "Notification job enqueued");
        Ok(())
    }

    /// Blocks up to `timeout_seconds` waiting for a job
    ///
    /// Returns `Ok(None)` on timeout so the worker loop can interleave
    /// shutdown checks. A job that fails to deserialize is an error; the
    /// worker logs and drops it.
    pub async fn pop(
        &self,
        timeout_seconds: usize,
    ) -> Result<Option<NotificationJob>, NotificationQueueError> {
        let mut conn = self.client.connection();
        let reply: Option<(String, String)> = redis::cmd("BRPOP")
            .arg(&self.key)
            .arg(timeout_seconds)
            .query_async(&mut conn)
            .await?;

        match reply {
            Some((_key, payload)) => {
                let job = serde_json::from_str(&payload)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_without_recipient_is_representable() {
        // Status-change notifications may have no assignee; the enqueue
        // still happens and the recipient stays empty on the wire.
        let job = NotificationJob {
            task_title: "Ship release".to_string(),
            user_id: None,
            action: "done".to_string(),
        };
        let payload = serde_json::to_string(&job).unwrap();
        let parsed: NotificationJob = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed, job);
        assert!(parsed.user_id.is_none());
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let result = serde_json::from_str::<NotificationJob>("{\"task_title\":42}");
        assert!(result.is_err());
    }
}
