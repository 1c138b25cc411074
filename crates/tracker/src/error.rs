//! Error types for tracker operations.

use crate::domain::IssueId;
use thiserror::Error;

/// The error type for tracker operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Issue not found.
    #[error("Issue not found: {0}")]
    IssueNotFound(IssueId),

    /// Caller-supplied data failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for tracker operations.
pub type Result<T> = std::result::Result<T, Error>;
