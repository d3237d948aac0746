//! HTTP layer: GET /health and POST /chat over a shared `RecipeEngine`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tracing::info;

use crate::engine::RecipeEngine;

/// Longest accepted chat message, in bytes.
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

pub fn router(engine: Arc<RecipeEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .with_state(engine)
}

async fn health(State(engine): State<Arc<RecipeEngine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: engine.model().to_string(),
    })
}

async fn chat(
    State(engine): State<Arc<RecipeEngine>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if body.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "message must not be empty".to_string(),
        ));
    }
    if body.message.len() > MAX_MESSAGE_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("message must be at most {} characters", MAX_MESSAGE_LEN),
        ));
    }

    let response = engine.suggest(&body.message).await;
    Ok(Json(ChatResponse { response }))
}

/// Binds `addr` and serves until ctrl-c.
pub async fn serve(engine: Arc<RecipeEngine>, addr: &str) -> Result<()> {
    let app = router(engine);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind API address '{}'", addr))?;
    info!(%addr, "recipe chat API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;
    Ok(())
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
