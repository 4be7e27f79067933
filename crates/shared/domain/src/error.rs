//! Domain-level errors.
//!
//! These errors represent failed lookups on user records.
//! They are independent of infrastructure concerns (HTTP, database, cache).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
