//! In-process presence service
//!
//! Implements `/login`, `/team` and `/me/status` over an in-memory roster.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use axum_extra::{
    extract::Query,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use parking_lot::RwLock;
use presence_core::{PresenceStatus, TeamMember};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::fixtures::{PASSWORD, TEAM};

struct Account {
    username: String,
    password: String,
    member: TeamMember,
}

#[derive(Default)]
struct Data {
    accounts: Vec<Account>,
    tokens: HashMap<String, i64>,
}

/// Shared stub state; clones see the same data
#[derive(Clone, Default)]
pub struct StubState {
    data: Arc<RwLock<Data>>,
}

impl StubState {
    /// State holding the seeded team
    pub fn seeded() -> Self {
        let accounts = TEAM
            .iter()
            .zip(1..)
            .map(|(seed, id)| Account {
                username: seed.username.to_string(),
                password: PASSWORD.to_string(),
                member: TeamMember::new(id, seed.full_name, seed.status),
            })
            .collect();

        Self {
            data: Arc::new(RwLock::new(Data {
                accounts,
                tokens: HashMap::new(),
            })),
        }
    }

    /// Invalidate every issued token
    pub fn revoke_all(&self) {
        self.data.write().tokens.clear();
    }

    /// Number of tokens currently accepted
    pub fn active_tokens(&self) -> usize {
        self.data.read().tokens.len()
    }

    /// Current record of the member with `full_name`
    pub fn member(&self, full_name: &str) -> Option<TeamMember> {
        self.data
            .read()
            .accounts
            .iter()
            .find(|a| a.member.full_name == full_name)
            .map(|a| a.member.clone())
    }
}

/// Stub error carrying the `{detail}` body the client expects
#[derive(Debug)]
pub enum StubError {
    Unauthorized(&'static str),
    Unprocessable(String),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Unauthorized(detail) => (StatusCode::UNAUTHORIZED, detail.to_string()),
            Self::Unprocessable(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Account id resolved from the bearer token
pub struct Caller(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    StubState: FromRef<S>,
{
    type Rejection = StubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| StubError::Unauthorized("Not authenticated"))?;

        let stub = StubState::from_ref(state);
        let id = stub.data.read().tokens.get(bearer.token()).copied();
        id.map(Caller)
            .ok_or(StubError::Unauthorized("Could not validate credentials"))
    }
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct TeamQuery {
    #[serde(default)]
    status: Vec<u8>,
}

#[derive(Deserialize)]
struct StatusBody {
    status: u8,
}

fn parse_status(value: u8) -> Result<PresenceStatus, StubError> {
    PresenceStatus::from_value(value).map_err(|e| StubError::Unprocessable(e.to_string()))
}

async fn login(
    State(stub): State<StubState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<serde_json::Value>, StubError> {
    let mut data = stub.data.write();
    let id = data
        .accounts
        .iter()
        .find(|a| a.username == body.username && a.password == body.password)
        .map(|a| a.member.id)
        .ok_or(StubError::Unauthorized("Invalid username or password"))?;

    let token = Uuid::new_v4().to_string();
    data.tokens.insert(token.clone(), id);

    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn team(
    State(stub): State<StubState>,
    _caller: Caller,
    Query(query): Query<TeamQuery>,
) -> Result<Json<Vec<TeamMember>>, StubError> {
    let wanted = query
        .status
        .into_iter()
        .map(parse_status)
        .collect::<Result<Vec<_>, _>>()?;

    let mut members: Vec<TeamMember> = stub
        .data
        .read()
        .accounts
        .iter()
        .map(|a| a.member.clone())
        .filter(|m| wanted.is_empty() || wanted.iter().any(|s| m.has_status(*s)))
        .collect();
    members.sort_by(|a, b| a.full_name.cmp(&b.full_name));

    Ok(Json(members))
}

async fn update_my_status(
    State(stub): State<StubState>,
    Caller(id): Caller,
    Json(body): Json<StatusBody>,
) -> Result<Json<TeamMember>, StubError> {
    let status = parse_status(body.status)?;

    let mut data = stub.data.write();
    let account = data
        .accounts
        .iter_mut()
        .find(|a| a.member.id == id)
        .ok_or(StubError::Unauthorized("Could not validate credentials"))?;

    account.member.status = status.label().to_string();
    account.member.updated_at = Utc::now();

    Ok(Json(account.member.clone()))
}

/// Router for the stub service
pub fn router(state: StubState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/team", get(team))
        .route("/me/status", patch(update_my_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
