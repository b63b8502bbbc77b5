//! # Taskboard Shared Library
//!
//! This crate contains the types and data-access logic shared between the
//! taskboard API server and the notification worker.
//!
//! ## Module Organization
//!
//! - `models`: Database models and scoped query operations
//! - `auth`: Password hashing, JWT tokens, and bearer-auth context
//! - `db`: Connection pool and migration runner
//! - `queue`: Notification job queue over Redis

pub mod auth;
pub mod db;
pub mod models;
pub mod queue;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
