use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api;
use crate::chat::ChatService;
use crate::config::ServerConfig;

/// Full application: API under `/api`, open CORS, bounded request bodies
pub fn app(config: &ServerConfig, service: Arc<ChatService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(service))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors)
}

pub async fn run(config: &ServerConfig, service: Arc<ChatService>) -> Result<()> {
    let app = app(config, service);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Web server stopped unexpectedly")
}
