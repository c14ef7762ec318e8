//! Scripted session for testing code written against [`SessionClient`].
//!
//! A [`ScriptedSession`] answers token requests and platform requests from a
//! script set up by the test, and records every request it receives so the
//! test can assert on endpoints and payload shapes afterwards.
//!
//! Responses are queued per endpoint and consumed in order. A request with
//! nothing queued for its endpoint fails with [`SessionError::Transport`].

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::client::{PlatformRequest, SessionClient};
use crate::error::SessionError;
use crate::SessionResult;

/// A canned answer to one platform request.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Respond with this JSON body.
    Json(serde_json::Value),

    /// Fail as if the connection dropped.
    TransportFailure(String),

    /// Fail with a platform error status.
    PlatformFailure { status: u16, message: String },
}

/// A request the session received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Operation name reported by the request.
    pub name: &'static str,

    /// Endpoint the request was sent to.
    pub endpoint: String,

    /// The payload as JSON.
    pub payload: serde_json::Value,
}

/// An in-memory [`SessionClient`] driven by a script.
#[derive(Debug)]
pub struct ScriptedSession {
    device_id: String,
    user_id: u64,
    token: Result<String, String>,
    responses: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    token_requests: Mutex<usize>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedSession {
    /// Create a session that hands out `token`.
    pub fn new(device_id: impl Into<String>, user_id: u64, token: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            user_id,
            token: Ok(token.into()),
            responses: Mutex::new(HashMap::new()),
            token_requests: Mutex::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a session whose token fetch always fails with `reason`.
    pub fn without_token(
        device_id: impl Into<String>,
        user_id: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            token: Err(reason.into()),
            ..Self::new(device_id, user_id, "")
        }
    }

    /// Queue a JSON response for `endpoint`.
    pub fn respond_json(&self, endpoint: impl Into<String>, body: serde_json::Value) -> &Self {
        self.respond(endpoint, ScriptedResponse::Json(body))
    }

    /// Queue an arbitrary response for `endpoint`.
    pub fn respond(&self, endpoint: impl Into<String>, response: ScriptedResponse) -> &Self {
        self.responses
            .lock()
            .entry(endpoint.into())
            .or_default()
            .push_back(response);
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Endpoints hit so far, in order.
    pub fn endpoints(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.endpoint.clone())
            .collect()
    }

    /// How many times a token was asked for.
    pub fn token_requests(&self) -> usize {
        *self.token_requests.lock()
    }
}

impl SessionClient for ScriptedSession {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn fetch_or_get_csrf_token(&self) -> SessionResult<String> {
        *self.token_requests.lock() += 1;
        self.token.clone().map_err(SessionError::Auth)
    }

    fn send_request<R: PlatformRequest>(&self, request: &R) -> SessionResult<R::Response> {
        let endpoint = request.endpoint();
        let payload = serde_json::to_value(request.payload())?;
        tracing::debug!(operation = request.name(), %endpoint, %payload, "Scripted request");

        self.requests.lock().push(RecordedRequest {
            name: request.name(),
            endpoint: endpoint.clone(),
            payload,
        });

        let response = self
            .responses
            .lock()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);

        match response {
            Some(ScriptedResponse::Json(body)) => Ok(serde_json::from_value(body)?),
            Some(ScriptedResponse::TransportFailure(reason)) => {
                Err(SessionError::Transport(reason))
            }
            Some(ScriptedResponse::PlatformFailure { status, message }) => {
                Err(SessionError::Platform { status, message })
            }
            None => Err(SessionError::Transport(format!(
                "no scripted response for {endpoint}"
            ))),
        }
    }
}
