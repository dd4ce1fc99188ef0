use presence_common::AppResult;
use presence_core::{FilterSet, PresenceStatus, TeamMember};
use tracing::instrument;

use crate::client::AuthorizedRequestClient;
use crate::dto::StatusUpdateRequest;
use crate::request::ApiRequest;

/// `GET /team` and `PATCH /me/status`
#[derive(Debug, Clone, Copy)]
pub struct TeamApi<'a> {
    client: &'a AuthorizedRequestClient,
}

impl<'a> TeamApi<'a> {
    pub fn new(client: &'a AuthorizedRequestClient) -> Self {
        Self { client }
    }

    /// Fetch the roster. Each selected status is sent as its own
    /// `status=<code>` parameter; an empty set asks for everyone.
    #[instrument(skip(self), fields(filters = filter_set.len()))]
    pub async fn fetch_team(&self, filter_set: &FilterSet) -> AppResult<Vec<TeamMember>> {
        let request = filter_set
            .values()
            .into_iter()
            .fold(ApiRequest::get("/team"), |request, value| {
                request.query("status", value)
            });

        self.client.send(request).await?.decode()
    }

    /// Set the caller's own status and return the updated record
    #[instrument(skip(self))]
    pub async fn update_my_status(&self, status: PresenceStatus) -> AppResult<TeamMember> {
        let request = ApiRequest::patch("/me/status").json(&StatusUpdateRequest { status })?;
        self.client.send(request).await?.decode()
    }
}
