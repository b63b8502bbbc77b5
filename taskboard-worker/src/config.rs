/// Configuration management for the notification worker
///
/// The worker needs the database (to resolve recipients at delivery
/// time), the broker, and a complete mail relay configuration. Missing
/// mail settings fail the process at startup rather than surfacing
/// later as silent delivery loss.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `REDIS_URL`: broker address (required)
/// - `SMTP_SERVER`: mail relay host (required)
/// - `SMTP_PORT`: mail relay port (default: 587)
/// - `SMTP_USERNAME`: relay credential (required)
/// - `SMTP_PASSWORD`: relay credential (required)
/// - `EMAIL_FROM`: sender address (required)

use std::env;

use taskboard_shared::db::DatabaseConfig;
use taskboard_shared::queue::QueueConfig;

/// Complete worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Database pool settings
    pub database: DatabaseConfig,

    /// Broker settings
    pub queue: QueueConfig,

    /// Mail relay settings
    pub mail: MailConfig,
}

/// SMTP relay configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay host
    pub server: String,

    /// Relay port (STARTTLS)
    pub port: u16,

    /// Relay username
    pub username: String,

    /// Relay password
    pub password: String,

    /// Sender address
    pub from_address: String,
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}

impl WorkerConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is missing or a
    /// numeric variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            ..Default::default()
        };

        let queue = QueueConfig::from_env()?;

        let mail = MailConfig {
            server: required("SMTP_SERVER")?,
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse::<u16>()?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            from_address: required("EMAIL_FROM")?,
        };

        Ok(Self {
            database,
            queue,
            mail,
        })
    }
}
