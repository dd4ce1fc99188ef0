//! Test doubles for code built on [`AuthorizedRequestClient`]
//!
//! [`AuthorizedRequestClient`]: crate::AuthorizedRequestClient

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use presence_common::{AppError, AppResult};
use presence_core::AuthenticationFailureHandler;
use tokio::sync::oneshot;

use crate::request::{ApiRequest, ApiResponse, Method};
use crate::transport::HttpTransport;

enum Reply {
    Ready(AppResult<ApiResponse>),
    Gated(oneshot::Receiver<AppResult<ApiResponse>>),
}

/// A request as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub authorization: Option<String>,
}

/// Transport answering from per-route queues of scripted replies.
///
/// Replies for one route are consumed in the order they were scripted.
/// A call to a route with nothing queued fails with `TransportFailure`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the route
    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) {
        self.push(method, path, Reply::Ready(Ok(response)));
    }

    /// Queue a transport-level failure for the route
    pub fn fail(&self, method: Method, path: &str, error: AppError) {
        self.push(method, path, Reply::Ready(Err(error)));
    }

    /// Queue a reply that is held back until the returned sender fires.
    ///
    /// Dropping the sender releases the call with a `TransportFailure`.
    pub fn gate(&self, method: Method, path: &str) -> oneshot::Sender<AppResult<ApiResponse>> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Reply::Gated(rx));
        tx
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received for the route
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(
        &self,
        request: &ApiRequest,
        authorization: Option<&str>,
    ) -> AppResult<ApiResponse> {
        self.requests.lock().push(RecordedRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            body: request.body.clone(),
            authorization: authorization.map(str::to_string),
        });

        let reply = self
            .replies
            .lock()
            .get_mut(&(request.method.clone(), request.path.clone()))
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::transport("gate dropped"))),
            None => Err(AppError::transport(format!(
                "no scripted reply for {} {}",
                request.method, request.path
            ))),
        }
    }
}

/// Failure handler that only counts invocations
#[derive(Debug, Default)]
pub struct CountingFailureHandler {
    calls: AtomicUsize,
}

impl CountingFailureHandler {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthenticationFailureHandler for CountingFailureHandler {
    fn on_authentication_lost(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
