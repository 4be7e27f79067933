//! Unified error handling.
//!
//! Provides the error returned by the remote users API adapter
//! ([`FetchError`]) and the application-wide error type ([`AppError`]).

use domain::DomainError;
use thiserror::Error;

// =============================================================================
// Remote Fetch Errors
// =============================================================================

/// Failure of a remote fetch of the user collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, read)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Invalid response: HTTP {0}")]
    InvalidResponse(u16),

    /// The body was not a valid user collection
    #[error("Decoding error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn network(msg: impl Into<String>) -> Self {
        FetchError::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        FetchError::Decode(msg.into())
    }
}

// =============================================================================
// Application Errors
// =============================================================================

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Data retrieval
    #[error("No user data available: {0}")]
    NoDataAvailable(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NoDataAvailable(_) => "NO_DATA_AVAILABLE",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "cache")]
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for data errors
            AppError::Validation(msg) => msg.clone(),
            AppError::NoDataAvailable(msg) => msg.clone(),

            // Hide details for infrastructure errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "A cache error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_) => AppError::NotFound,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn no_data(cause: impl Into<String>) -> Self {
        AppError::NoDataAvailable(cause.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
