//! # Forum API Server
//!
//! HTTP surface of the forum backend. `main.rs` wires these modules into an
//! Actix-web server; integration tests mount the same routes in-process.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
