//! Ports (interfaces) implemented by the storage and boundary layers
//!
//! The domain defines what it needs; the infrastructure layer provides the
//! implementation and the boundary layer supplies the side effects.

use crate::error::DomainResult;

// ============================================================================
// Token Storage
// ============================================================================

/// Durable key/value storage for client state that must survive a restart
pub trait TokenStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> DomainResult<()>;
}

// ============================================================================
// Authentication Failure
// ============================================================================

/// Side effect run when the remote service rejects the session token.
///
/// Called after the session has been cleared; implementations return the
/// application to its unauthenticated entry point.
pub trait AuthenticationFailureHandler: Send + Sync {
    fn on_authentication_lost(&self);
}
