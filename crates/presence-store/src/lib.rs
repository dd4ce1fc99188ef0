//! # presence-store
//!
//! Client-side session state and the storage that keeps it across restarts.
//!
//! ## Features
//!
//! - **Session Store**: the authentication token and the derived
//!   authenticated flag, with an explicit boot-time `initialize`
//! - **Token Storage**: a JSON file backend for real use and an in-memory
//!   backend for tests and ephemeral sessions
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use presence_store::{FileTokenStorage, SessionStore};
//!
//! let storage = Arc::new(FileTokenStorage::new(&config.session.file));
//! let session = SessionStore::new(storage);
//!
//! // Must run before anything renders
//! let snapshot = session.initialize()?;
//! if !snapshot.authenticated {
//!     // show the login screen
//! }
//! ```

pub mod session;
pub mod storage;

pub use session::{Session, SessionStore, TOKEN_KEY};
pub use storage::{FileTokenStorage, MemoryTokenStorage};
