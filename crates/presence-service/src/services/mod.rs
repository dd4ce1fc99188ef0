//! Application services
//!
//! Workflows that combine the session, the request client and navigation.

pub mod auth;
pub mod context;
pub mod navigator;
pub mod presence;

pub use auth::{login_error_message, AuthService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use navigator::{Navigator, Route};
pub use presence::{PresenceSnapshot, PresenceViewModel, ROSTER_ERROR, STATUS_ERROR};
