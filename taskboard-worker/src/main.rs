//! # Taskboard Notification Worker
//!
//! Consumes notification jobs enqueued by the API server and delivers
//! them as email over SMTP. Runs as a separate process; the API never
//! waits on it.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskboard-worker
//! ```

use taskboard_worker::{config::WorkerConfig, consumer::Consumer, mailer::Mailer};

use taskboard_shared::db::create_pool;
use taskboard_shared::queue::{NotificationQueue, QueueClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard worker v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Incomplete mail configuration is a startup failure by contract
    let config = WorkerConfig::from_env()?;
    let mailer = Mailer::new(&config.mail)?;

    let pool = create_pool(config.database.clone()).await?;

    let queue_client = QueueClient::connect(config.queue.clone()).await?;
    let queue = NotificationQueue::new(queue_client);

    Consumer::new(pool, queue, mailer).run().await
}
