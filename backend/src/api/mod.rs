//! API module
//!
//! Contains HTTP request handlers for the agent hub endpoints and the router
//! that wires them to paths under `/api`.

pub mod agents;
pub mod chat;
pub mod conversations;
pub mod envelope;
pub mod extract;
pub mod tools;

use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable message
    pub message: String,
}

/// GET /api/health - Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Agent hub is healthy".to_string(),
    })
}

/// Turn a handler panic into the generic 500 envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

/// Build the API router over the given state
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // Agents
        .route(
            "/api/agents",
            get(agents::list_agents).post(agents::create_agent),
        )
        .route(
            "/api/agents/:id",
            get(agents::get_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/api/agents/:id/chat", post(chat::send_message))
        // Conversations
        .route(
            "/api/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/api/conversations/:id",
            get(conversations::get_conversation)
                .put(conversations::update_conversation)
                .delete(conversations::delete_conversation),
        )
        .route(
            "/api/conversations/:id/messages",
            post(conversations::add_message),
        )
        // Tools
        .route("/api/tools", get(tools::list_tools))
        .route(
            "/api/tools/:id",
            get(tools::get_tool).put(tools::update_tool),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
