//! # Taskboard Notification Worker library
//!
//! Consumes notification jobs from the Redis queue and delivers them as
//! email. Delivery is best-effort: failures are logged and dropped, and
//! the originating request never observes the outcome.

pub mod config;
pub mod consumer;
pub mod mailer;
