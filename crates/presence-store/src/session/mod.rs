//! Session state module.

mod session_store;

pub use session_store::{Session, SessionStore, TOKEN_KEY};
