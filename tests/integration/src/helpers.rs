//! Test helpers for integration tests
//!
//! Spawns the stub service on an ephemeral port and wires client contexts
//! against it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use presence_client::ReqwestTransport;
use presence_common::{ApiConfig, ClientConfig};
use presence_core::TokenStorage;
use presence_service::{ServiceContext, ServiceContextBuilder};
use presence_store::{FileTokenStorage, SessionStore};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::stub::{router, StubState};

/// Stub server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: StubState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a stub server with the seeded team
    pub async fn start() -> Result<Self> {
        let state = StubState::seeded();
        let app = router(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
        }
    }

    /// Client configuration pointing at this server, persisting the session
    /// in `session_file`
    pub fn client_config(&self, session_file: &Path) -> Result<ClientConfig> {
        let vars = HashMap::from([
            ("PRESENCE_API_URL".to_string(), self.base_url()),
            (
                "PRESENCE_SESSION_FILE".to_string(),
                session_file.display().to_string(),
            ),
        ]);
        Ok(ClientConfig::from_lookup(|key| vars.get(key).cloned())?)
    }

    /// Boot a client context over `storage`, as the application does at
    /// startup
    pub fn boot(&self, storage: Arc<dyn TokenStorage>) -> Result<ServiceContext> {
        let session = Arc::new(SessionStore::new(storage));
        session.initialize()?;

        let transport = Arc::new(ReqwestTransport::new(self.api_config())?);
        Ok(ServiceContextBuilder::new()
            .session(session)
            .transport(transport)
            .build()?)
    }

    /// Boot a client context persisting its session in `path`
    pub fn boot_with_file(&self, path: &Path) -> Result<ServiceContext> {
        self.boot(Arc::new(FileTokenStorage::new(path)))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
