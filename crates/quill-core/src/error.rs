//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error(transparent)]
    Repo(RepoError),
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

    /// A foreign key points at a row that does not exist.
    #[error("Dangling reference: {0}")]
    Reference(String),

    #[error("Invalid value for field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::Reference(msg) => DomainError::Validation(msg),
            RepoError::InvalidField { field, reason } => {
                DomainError::Validation(format!("{field}: {reason}"))
            }
            other => DomainError::Repo(other),
        }
    }
}
