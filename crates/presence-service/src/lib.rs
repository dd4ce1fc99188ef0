//! # presence-service
//!
//! Application layer: login and logout, the route the user is on, and the
//! presence view-model that backs the dashboard.

pub mod services;

pub use services::{
    login_error_message, AuthService, Navigator, PresenceSnapshot, PresenceViewModel, Route,
    ServiceContext, ServiceContextBuilder, ROSTER_ERROR, STATUS_ERROR,
};
