//! Application error types
//!
//! Unified error handling for the entire client.

use presence_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authorization rejected by the remote service
    #[error("Authentication lost")]
    AuthenticationLost,

    // Remote service errors
    #[error(
        "Request failed with status {status}{}",
        .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
    )]
    RequestFailed { status: u16, detail: Option<String> },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // Local persistence
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Domain errors
    #[error(transparent)]
    Domain(DomainError),
}

impl AppError {
    /// HTTP status the remote service answered with, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthenticationLost => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            Self::TransportFailure(_)
            | Self::InvalidResponse(_)
            | Self::Storage(_)
            | Self::Config(_)
            | Self::Domain(_) => None,
        }
    }

    /// Get error code for logs and diagnostics
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationLost => "AUTHENTICATION_LOST",
            Self::RequestFailed { .. } => "REQUEST_FAILED",
            Self::TransportFailure(_) => "TRANSPORT_FAILURE",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the session was rejected by the remote service
    #[must_use]
    pub fn is_authentication_lost(&self) -> bool {
        matches!(self, Self::AuthenticationLost)
    }

    /// Check if a caller may recover locally and keep its previous state.
    ///
    /// Authentication loss always ends the session and is never recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !self.is_authentication_lost()
    }

    /// Server provided detail message, if the failure carried one
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Create a request failure
    #[must_use]
    pub fn request_failed(status: u16, detail: Option<String>) -> Self {
        Self::RequestFailed { status, detail }
    }

    /// Create a transport failure from any error
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::TransportFailure(err.to_string())
    }

    /// Create an invalid response error from any error
    pub fn invalid_response(err: impl std::fmt::Display) -> Self {
        Self::InvalidResponse(err.to_string())
    }

    /// Create a storage error from any error
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::StorageError(msg) => Self::Storage(msg),
            other => Self::Domain(other),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Error body returned by the remote service on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    /// Extract the detail message from a raw response body, if it has one
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .map(|parsed| parsed.detail)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
