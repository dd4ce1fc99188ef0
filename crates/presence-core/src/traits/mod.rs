//! Ports - interfaces the domain needs and outer layers provide

mod ports;

pub use ports::{AuthenticationFailureHandler, TokenStorage};
