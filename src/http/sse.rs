//! Server-Sent-Events transport handlers
//!
//! A client opens `GET /sse` and receives an `endpoint` event naming the URL
//! to post messages to. Responses to those posts are delivered as `message`
//! events on the same stream. Sessions live as long as their stream.

use std::{collections::HashMap, convert::Infallible, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::http::handlers::{discovery_for, DiscoveryResponse};
use crate::mcp::rpc::{json_rpc_error, PARSE_ERROR};
use crate::mcp::server::handle_json_rpc_payload;
use crate::AppState;

pub const SSE_ENDPOINT: &str = "/sse";
pub const MESSAGE_ENDPOINT: &str = "/message";

const SESSION_CHANNEL_CAPACITY: usize = 32;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, mpsc::Sender<Value>>>>,
}

impl SessionStore {
    pub async fn open(&self) -> (String, mpsc::Receiver<Value>) {
        let session_id = Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), sender);
        (session_id, receiver)
    }

    pub async fn sender(&self, session_id: &str) -> Option<mpsc::Sender<Value>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn close(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Removes its session once the event stream that owns it is dropped.
struct SessionGuard {
    store: SessionStore,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let store = self.store.clone();
        let session_id = std::mem::take(&mut self.session_id);
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                store.close(&session_id).await;
                info!(session_id = %session_id, "sse session closed");
            });
        }
    }
}

#[derive(Clone)]
pub struct SseState {
    pub app: AppState,
    pub sessions: SessionStore,
    pub keep_alive: Duration,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

pub fn endpoint_for(session_id: &str) -> String {
    format!("{MESSAGE_ENDPOINT}?sessionId={session_id}")
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(discovery_for("sse", SSE_ENDPOINT))
}

pub async fn connect(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, receiver) = state.sessions.open().await;
    let active_sessions = state.sessions.len().await;
    info!(
        session_id = %session_id,
        active_sessions = active_sessions,
        "sse session opened"
    );

    let endpoint = Event::default()
        .event("endpoint")
        .data(endpoint_for(&session_id));
    let guard = SessionGuard {
        store: state.sessions.clone(),
        session_id,
    };

    let messages = ReceiverStream::new(receiver).map(move |message| {
        let _session = &guard;
        Ok(Event::default().event("message").data(message.to_string()))
    });
    let stream = tokio_stream::once(Ok(endpoint)).chain(messages);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keep_alive))
}

pub async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Response {
    let Some(session_id) = query
        .session_id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    else {
        return AppError::bad_request("missing_session_id", "sessionId query parameter is required")
            .into_response();
    };

    let Some(sender) = state.sessions.sender(&session_id).await else {
        return AppError::not_found("session_not_found", "unknown or closed sse session")
            .into_response();
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json_rpc_error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response()
        }
    };

    if let Some(response) = handle_json_rpc_payload(&state.app, payload).await {
        if sender.send(response).await.is_err() {
            debug!(session_id = %session_id, "sse stream dropped before delivery");
            state.sessions.close(&session_id).await;
            return AppError::not_found("session_not_found", "unknown or closed sse session")
                .into_response();
        }
    }

    StatusCode::ACCEPTED.into_response()
}
