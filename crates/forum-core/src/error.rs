//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id: id.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Stored document could not be decoded: {0}")]
    Decode(String),
}

/// Store failures surface as persistence errors; callers that can name the
/// missing entity match `RepoError::NotFound` themselves.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Persistence(err.to_string())
    }
}
