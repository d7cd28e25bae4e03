use std::{sync::Arc, time::Duration};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod transport;

use domain::{prompts, resources, tools};
use http::sse::{SessionStore, SseState};
use mcp::registry::Registry;

#[derive(Clone)]
pub struct AppState {
    pub api_token: Option<Arc<str>>,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(api_token: Option<String>, registry: Registry) -> Self {
        Self {
            api_token: api_token.map(Arc::<str>::from),
            registry: Arc::new(registry),
        }
    }
}

/// Registers every tool, resource and prompt the server exposes.
pub fn build_registry() -> Registry {
    let mut registry = Registry::new();

    registry.register_tool(tools::calculator_definition(), tools::calculator);
    registry.register_tool(tools::system_info_definition(), tools::system_info);

    registry.register_resource(
        resources::system_status_definition(),
        resources::system_status,
    );
    registry.register_resource(
        resources::math_constants_definition(),
        resources::math_constants,
    );

    registry.register_prompt(prompts::math_tutor_definition(), prompts::math_tutor);
    registry.register_prompt(prompts::code_review_definition(), prompts::code_review);

    registry
}

pub fn build_app(state: AppState) -> Router {
    let protected = Router::new()
        .route(http::handlers::MCP_ENDPOINT, post(http::handlers::mcp_endpoint))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .merge(protected)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

pub fn build_sse_app(state: AppState, sessions: SessionStore, keep_alive: Duration) -> Router {
    let sse_state = SseState {
        app: state.clone(),
        sessions,
        keep_alive,
    };

    let protected = Router::new()
        .route(http::sse::SSE_ENDPOINT, get(http::sse::connect))
        .route(http::sse::MESSAGE_ENDPOINT, post(http::sse::post_message))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_bearer_token,
        ));

    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::sse::discovery))
        .merge(protected)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(sse_state)
}
