//! # Forum Infrastructure
//!
//! Concrete implementations of the ports defined in `forum-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post repository via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
