//! Bindings for the remote service endpoints

mod auth;
mod team;

pub use auth::AuthApi;
pub use team::TeamApi;
