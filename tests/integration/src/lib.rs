//! Integration test utilities for the presence client
//!
//! Runs the real client stack against an in-process stand-in for the
//! presence service.

pub mod helpers;
pub mod stub;

pub use fixtures::*;
pub use helpers::*;
pub use stub::{router, StubState};
