//! # Forum Core
//!
//! The domain layer of the forum backend.
//! This crate contains the Post aggregate, the repository port and the
//! service that orchestrates them, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
