/// Configuration management for the API server
///
/// Loads configuration from environment variables into a type-safe
/// struct. A `.env` file is honored in development via dotenvy.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `REDIS_URL`: notification broker address (required)
/// - `JWT_SECRET`: HS256 signing key, at least 32 bytes (required)
/// - `API_HOST`: bind host (default: 0.0.0.0)
/// - `API_PORT`: bind port (default: 8080)
/// - `RUST_LOG`: log filter (default: info)

use std::env;

use taskboard_shared::db::DatabaseConfig;
use taskboard_shared::queue::QueueConfig;

/// Complete API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub api: ApiConfig,

    /// Database pool settings
    pub database: DatabaseConfig,

    /// Broker settings
    pub queue: QueueConfig,

    /// JWT signing secret
    pub jwt_secret: String,
}

/// HTTP server bind configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a numeric
    /// variable fails to parse, or the JWT secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let queue = QueueConfig::from_env()?;

        Ok(Self {
            api: ApiConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                ..Default::default()
            },
            queue,
            jwt_secret,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                ..Default::default()
            },
            queue: QueueConfig {
                url: "redis://localhost:6379".to_string(),
            },
            jwt_secret: "test-secret-key-at-least-32-bytes-long".to_string(),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
