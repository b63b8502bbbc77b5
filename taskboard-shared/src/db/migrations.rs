/// Database migration runner
///
/// Runs the SQL migrations embedded from the `migrations/` directory of
/// this crate. Both the API server and the worker call this at startup;
/// sqlx records applied versions in `_sqlx_migrations` so reruns are
/// no-ops.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::{create_pool, run_migrations, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::info;

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or the database
/// connection is lost mid-run. Failed migrations are rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
