/// Notification job consumer
///
/// Blocking-pop loop over the Redis queue. For each job the consumer
/// resolves the recipient's email address from the database at delivery
/// time, builds the email, and sends it. Every failure mode is
/// contained here:
///
/// - no recipient on the job: silent no-op (assignee was cleared)
/// - recipient no longer exists: silent no-op (deleted after enqueue)
/// - transport failure: logged and dropped, no retry, no dead-letter
///
/// Nothing propagates back to the request that enqueued the job.

use sqlx::PgPool;
use taskboard_shared::models::user::User;
use taskboard_shared::queue::{NotificationJob, NotificationQueue};
use tracing::{debug, info, warn};

use crate::mailer::Mailer;

/// How long each BRPOP blocks before the loop re-checks for shutdown
const POP_TIMEOUT_SECONDS: usize = 5;

/// Notification consumer
pub struct Consumer {
    db: PgPool,
    queue: NotificationQueue,
    mailer: Mailer,
}

impl Consumer {
    /// Creates a consumer
    pub fn new(db: PgPool, queue: NotificationQueue, mailer: Mailer) -> Self {
        Self { db, queue, mailer }
    }

    /// Runs the consume loop until a shutdown signal arrives
    ///
    /// Broker errors back off for a second and continue; the loop never
    /// exits because of a bad job.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Notification consumer ready");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received, exiting...");
                    break;
                }
                result = self.queue.pop(POP_TIMEOUT_SECONDS) => {
                    match result {
                        Ok(Some(job)) => self.handle_job(job).await,
                        Ok(None) => {}
                        Err(e) => {
                            warn!(error = %e, "Failed to pop notification job");
                            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Delivers one job, containing all failures
    pub async fn handle_job(&self, job: NotificationJob) {
        let Some(user_id) = job.user_id else {
            debug!(action = %job.action, "Job has no recipient, dropping");
            return;
        };

        // Resolve the address at delivery time, not enqueue time
        let user = match User::find_by_id(&self.db, user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(%user_id, "Recipient no longer exists, dropping");
                return;
            }
            Err(e) => {
                warn!(error = %e, %user_id, "Failed to resolve recipient, dropping");
                return;
            }
        };

        match self
            .mailer
            .send(&user.email, &job.task_title, &job.action)
            .await
        {
            Ok(()) => {
                info!(to = %user.email, action = %job.action, "Email sent");
            }
            Err(e) => {
                warn!(error = %e, to = %user.email, "Email send failed");
            }
        }
    }
}
