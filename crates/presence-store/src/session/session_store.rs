//! Session token lifecycle.
//!
//! Owns the authentication token and the authenticated flag derived from it.
//! The token is trusted until the remote service rejects it.

use std::sync::Arc;

use parking_lot::RwLock;
use presence_common::AppResult;
use presence_core::TokenStorage;

/// Storage key of the persisted token
pub const TOKEN_KEY: &str = "token";

/// Point-in-time view of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub authenticated: bool,
}

impl Session {
    fn from_token(token: Option<String>) -> Self {
        let authenticated = token.is_some();
        Self {
            token,
            authenticated,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    initialized: bool,
    generation: u64,
}

/// Session store shared by everything that needs the token
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create an uninitialized store over `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Load the persisted token. Runs once at boot, before anything that
    /// depends on the session is shown; later calls return the current state.
    pub fn initialize(&self) -> AppResult<Session> {
        let mut state = self.state.write();
        if state.initialized {
            return Ok(Session::from_token(state.token.clone()));
        }

        let token = self
            .storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty());

        state.token = token;
        state.initialized = true;

        tracing::debug!(authenticated = state.token.is_some(), "Session initialized");

        Ok(Session::from_token(state.token.clone()))
    }

    /// Persist the token issued by a successful login
    pub fn set_session(&self, token: impl Into<String>) -> AppResult<()> {
        let token = token.into();
        let mut state = self.state.write();

        self.storage.set(TOKEN_KEY, &token)?;

        state.token = Some(token);
        state.initialized = true;
        state.generation += 1;

        tracing::debug!("Stored session token");

        Ok(())
    }

    /// Forget the token, in memory and on disk. Clearing an already cleared
    /// session succeeds.
    ///
    /// The in-memory token is dropped even if the persisted copy cannot be
    /// removed, so no further request carries it. When removal fails the
    /// persisted value is blanked instead, which the next boot reads as
    /// logged out.
    pub fn clear_session(&self) -> AppResult<()> {
        let mut state = self.state.write();
        let had_token = state.token.take().is_some();
        state.initialized = true;
        if had_token {
            state.generation += 1;
        }

        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted token, blanking it");
            self.storage.set(TOKEN_KEY, "")?;
        }

        if had_token {
            tracing::debug!("Cleared session token");
        }

        Ok(())
    }

    /// Current token, if authenticated
    pub fn current_token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    /// Counter bumped whenever the token is replaced or dropped.
    ///
    /// Work started under one generation must not be applied under another.
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Current session state
    pub fn snapshot(&self) -> Session {
        Session::from_token(self.current_token())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.token.is_some())
            .field("initialized", &state.initialized)
            .finish()
    }
}
