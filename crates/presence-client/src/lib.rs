//! # presence-client
//!
//! Network layer of the presence client. Every call to the remote service
//! goes through [`AuthorizedRequestClient`], which attaches the session token
//! and tears the session down when the service rejects it.

pub mod api;
pub mod client;
pub mod dto;
pub mod request;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-export commonly used types at crate root
pub use api::{AuthApi, TeamApi};
pub use client::AuthorizedRequestClient;
pub use dto::{LoginRequest, StatusUpdateRequest, TokenResponse};
pub use request::{ApiRequest, ApiResponse, Method};
pub use transport::{HttpTransport, ReqwestTransport};
