/// Database layer
///
/// Connection pool management and embedded migrations.
pub mod migrations;
pub mod pool;

pub use migrations::run_migrations;
pub use pool::{create_pool, DatabaseConfig};
