use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::VERSION;
use crate::chat::{ChatReply, ChatService};

#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// False until a weather API key is configured
    pub configured: bool,
}

pub fn router(service: Arc<ChatService>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(service)
}

async fn chat(
    State(service): State<Arc<ChatService>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(service.respond(&request.message).await)
}

async fn health(State(service): State<Arc<ChatService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        configured: service.is_configured(),
    })
}
