//! # Taskboard API Server library
//!
//! Request handling and authorization for projects and tasks. The binary
//! in `main.rs` wires configuration, database, and the notification
//! queue into the router built here.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
