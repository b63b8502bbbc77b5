//! # Taskboard API Server
//!
//! HTTP server for the taskboard task/project manager:
//! - Bearer-token authentication (register/login + JWT middleware)
//! - Owner-scoped project and task CRUD
//! - Fire-and-forget notification enqueue on task mutations
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskboard-api
//! ```

use taskboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskboard_shared::{
    db::{create_pool, run_migrations},
    queue::{NotificationQueue, QueueClient},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(config.database.clone()).await?;
    run_migrations(&pool).await?;

    let queue_client = QueueClient::connect(config.queue.clone()).await?;
    let queue = NotificationQueue::new(queue_client);

    let bind_address = config.bind_address();
    let state = AppState::new(pool, queue, config);
    let app = build_router(state);

    tracing::info!("Server listening on http://{}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
