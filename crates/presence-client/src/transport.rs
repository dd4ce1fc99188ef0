//! Transport abstraction over the HTTP client
//!
//! The client logic only needs "send this, give me status and body". Keeping
//! that behind a trait lets tests script responses without a network.

use async_trait::async_trait;
use presence_common::{ApiConfig, AppError, AppResult};
use reqwest::header::AUTHORIZATION;

use crate::request::{ApiRequest, ApiResponse};

/// Executes one request, exactly once
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request`, with `authorization` as the `Authorization` header
    /// value when present. Fails only when no response was obtained.
    async fn execute(
        &self,
        request: &ApiRequest,
        authorization: Option<&str>,
    ) -> AppResult<ApiResponse>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    /// Create a transport for the configured service
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("team-presence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::transport)?;

        Ok(Self::with_client(client, config))
    }

    /// Create a transport around an existing client
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: &ApiRequest,
        authorization: Option<&str>,
    ) -> AppResult<ApiResponse> {
        let url = self.config.url(&request.path);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(error = %e, url = %url, "Transport failure");
            AppError::transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(AppError::transport)?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
