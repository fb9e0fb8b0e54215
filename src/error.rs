/// Unified error types for the Sentinel panel
use thiserror::Error;

use crate::models::RequestStatus;

/// Main error type for the record store and the moderation workflow
#[derive(Error, Debug)]
pub enum SentinelError {
    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login lookups that did not match a staff account
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Insufficient staff level for the attempted operation
    #[error("Insufficient permission: {0}")]
    Authorization(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request that was already reviewed cannot be reviewed again
    #[error("Request {id} was already {status}")]
    InvalidTransition { id: String, status: RequestStatus },

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SentinelError {
    /// Whether this error is a workflow denial rather than a fault
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            SentinelError::Authorization(_) | SentinelError::InvalidTransition { .. }
        )
    }
}

/// Result type alias for Sentinel operations
pub type SentinelResult<T> = Result<T, SentinelError>;
