/// Redis broker connection management
///
/// Thin wrapper around `redis::aio::ConnectionManager` that handles
/// configuration from environment variables, automatic reconnection, and
/// a PING health check at startup. Both the API server (enqueue side)
/// and the worker (consume side) connect through this type.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::queue::client::{QueueClient, QueueConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = QueueConfig::from_env()?;
/// let client = QueueClient::connect(config).await?;
/// client.ping().await?;
/// # Ok(())
/// # }
/// ```

use redis::aio::ConnectionManager;
use redis::RedisError;
use std::env;
use thiserror::Error;

/// Queue client errors
#[derive(Debug, Error)]
pub enum QueueClientError {
    /// Connection establishment failed
    #[error("Queue connection error: {0}")]
    ConnectionError(String),

    /// Command execution failed
    #[error("Queue command error: {0}")]
    CommandError(String),

    /// Configuration error
    #[error("Queue configuration error: {0}")]
    ConfigError(String),
}

impl From<RedisError> for QueueClientError {
    fn from(err: RedisError) -> Self {
        if err.is_connection_refusal() || err.is_io_error() {
            QueueClientError::ConnectionError(err.to_string())
        } else {
            QueueClientError::CommandError(err.to_string())
        }
    }
}

/// Broker configuration
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Redis connection URL
    ///
    /// Format: redis://[username:password@]host:port[/db]
    pub url: String,
}

impl QueueConfig {
    /// Loads broker configuration from the environment
    ///
    /// # Environment Variables
    ///
    /// - `REDIS_URL`: broker address (required)
    ///
    /// # Errors
    ///
    /// Returns `QueueClientError::ConfigError` if `REDIS_URL` is unset.
    pub fn from_env() -> Result<Self, QueueClientError> {
        dotenvy::dotenv().ok();

        let url = env::var("REDIS_URL").map_err(|_| {
            QueueClientError::ConfigError("REDIS_URL environment variable is required".to_string())
        })?;

        Ok(Self { url })
    }
}

/// Broker connection handle
///
/// Cheap to clone; the underlying `ConnectionManager` multiplexes one
/// connection and reconnects automatically on failure.
#[derive(Clone)]
pub struct QueueClient {
    manager: ConnectionManager,
}

impl QueueClient {
    /// Connects to the broker
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the broker is
    /// unreachable.
    pub async fn connect(config: QueueConfig) -> Result<Self, QueueClientError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| QueueClientError::ConfigError(format!("Invalid Redis URL: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| QueueClientError::ConnectionError(e.to_string()))?;

        tracing::info!("Connected to notification broker");
        Ok(Self { manager })
    }

    /// Health check via PING
    pub async fn ping(&self) -> Result<(), QueueClientError> {
        let mut conn = self.manager.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(QueueClientError::CommandError(format!(
                "Unexpected PING reply: {}",
                pong
            )))
        }
    }

    /// Returns a connection handle for command execution
    pub(crate) fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}
