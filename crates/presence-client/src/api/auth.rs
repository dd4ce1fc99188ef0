use presence_common::AppResult;
use tracing::instrument;

use crate::client::AuthorizedRequestClient;
use crate::dto::{LoginRequest, TokenResponse};
use crate::request::ApiRequest;

/// `POST /login`
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a AuthorizedRequestClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a AuthorizedRequestClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for an access token.
    ///
    /// Sent without the session token; a rejection is reported as
    /// `RequestFailed` carrying the server's detail message.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let request = ApiRequest::post("/login").json(&LoginRequest::new(username, password))?;
        self.client.send_public(request).await?.decode()
    }
}
