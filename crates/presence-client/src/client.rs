//! Authorized request client
//!
//! Builds every outgoing call against the current session token and enforces
//! session eviction when the remote service rejects it.

use std::sync::Arc;

use presence_common::{ApiConfig, AppError, AppResult};
use presence_core::AuthenticationFailureHandler;
use presence_store::SessionStore;
use tracing::{debug, instrument, warn};

use crate::request::{ApiRequest, ApiResponse};
use crate::transport::{HttpTransport, ReqwestTransport};

const UNAUTHORIZED: u16 = 401;

/// Request client shared by all remote calls.
///
/// Holds no per-call state; clones share the transport, the session and the
/// failure handler, and independent calls may run concurrently.
#[derive(Clone)]
pub struct AuthorizedRequestClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    on_authentication_lost: Arc<dyn AuthenticationFailureHandler>,
}

impl AuthorizedRequestClient {
    /// Create a client over an arbitrary transport
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionStore>,
        on_authentication_lost: Arc<dyn AuthenticationFailureHandler>,
    ) -> Self {
        Self {
            transport,
            session,
            on_authentication_lost,
        }
    }

    /// Create a client talking HTTP to the configured service
    pub fn from_config(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        on_authentication_lost: Arc<dyn AuthenticationFailureHandler>,
    ) -> AppResult<Self> {
        let transport = ReqwestTransport::new(config.clone())?;
        Ok(Self::new(Arc::new(transport), session, on_authentication_lost))
    }

    /// Session this client authorizes requests with
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Send an authorized request.
    ///
    /// A 401 clears the session, runs the authentication-failure handler and
    /// fails with `AuthenticationLost`; the response body is discarded. Any
    /// other non-2xx status fails with `RequestFailed`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let authorization = self
            .session
            .current_token()
            .map(|token| format!("Bearer {token}"));

        let response = self
            .transport
            .execute(&request, authorization.as_deref())
            .await?;

        if response.status == UNAUTHORIZED {
            self.evict_session();
            return Err(AppError::AuthenticationLost);
        }

        debug!(status = response.status, "Response received");
        response.error_for_status()
    }

    /// Send a request without credentials and without the eviction path.
    ///
    /// Used for the login exchange, where a 401 means "wrong credentials"
    /// rather than "session lost".
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_public(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let response = self.transport.execute(&request, None).await?;

        debug!(status = response.status, "Response received");
        response.error_for_status()
    }

    fn evict_session(&self) {
        warn!("Session rejected by the remote service");

        if let Err(e) = self.session.clear_session() {
            warn!(error = %e, "Failed to remove persisted session");
        }
        self.on_authentication_lost.on_authentication_lost();
    }
}

impl std::fmt::Debug for AuthorizedRequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedRequestClient")
            .field("session", &self.session)
            .finish()
    }
}
