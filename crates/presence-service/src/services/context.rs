//! Service context - dependency container for services
//!
//! Holds the session, the request client and the navigator. Cloning is cheap;
//! every clone shares the same session and route.

use std::sync::Arc;

use presence_client::{AuthorizedRequestClient, HttpTransport, ReqwestTransport};
use presence_common::{AppError, AppResult, ClientConfig};
use presence_store::{FileTokenStorage, SessionStore};
use tracing::info;

use super::navigator::Navigator;

#[derive(Clone)]
pub struct ServiceContext {
    session: Arc<SessionStore>,
    navigator: Arc<Navigator>,
    client: AuthorizedRequestClient,
}

impl ServiceContext {
    /// Wire the context together. The navigator doubles as the client's
    /// authentication-failure handler.
    pub fn new(
        session: Arc<SessionStore>,
        navigator: Arc<Navigator>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let client = AuthorizedRequestClient::new(transport, session.clone(), navigator.clone());
        Self {
            session,
            navigator,
            client,
        }
    }

    /// Boot from configuration: restore the persisted session, then pick the
    /// starting route from it.
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        let storage = Arc::new(FileTokenStorage::new(&config.session.file));
        let session = Arc::new(SessionStore::new(storage.clone()));
        let restored = session.initialize()?;

        info!(
            authenticated = restored.authenticated,
            api = %config.api.base_url,
            session_file = %storage.path().display(),
            "Session restored"
        );

        let transport = Arc::new(ReqwestTransport::new(config.api.clone())?);
        ServiceContextBuilder::new()
            .session(session)
            .transport(transport)
            .build()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn client(&self) -> &AuthorizedRequestClient {
        &self.client
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("session", &self.session)
            .field("route", &self.navigator.current())
            .finish()
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    session: Option<Arc<SessionStore>>,
    navigator: Option<Arc<Navigator>>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn navigator(mut self, navigator: Arc<Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the ServiceContext
    ///
    /// Without an explicit navigator, one is derived from the session, so
    /// the session should already be initialized.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the session or transport is missing
    pub fn build(self) -> AppResult<ServiceContext> {
        let session = self
            .session
            .ok_or_else(|| AppError::Config("session is required".to_string()))?;
        let transport = self
            .transport
            .ok_or_else(|| AppError::Config("transport is required".to_string()))?;
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(Navigator::from_session(&session)));

        Ok(ServiceContext::new(session, navigator, transport))
    }
}
