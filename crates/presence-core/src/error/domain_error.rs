//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid status value: {0}")]
    InvalidStatusValue(i64),

    #[error("Unknown status: {0}")]
    UnknownStatusLabel(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStatusValue(_) => "INVALID_STATUS",
            Self::UnknownStatusLabel(_) => "UNKNOWN_STATUS",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidStatusValue(_) | Self::UnknownStatusLabel(_))
    }

    /// Create a storage error from anything displayable
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageError(err.to_string())
    }
}

/// Result type for domain operations and ports
pub type DomainResult<T> = Result<T, DomainError>;
