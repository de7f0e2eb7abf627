//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{extract, feedback, predict};
use super::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the AI-Powered Healthcare Assistant API!";

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser front ends are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/predict", post(predict::predict))
        .route("/extract_symptoms", post(extract::extract_symptoms))
        .route("/extract_symptoms_medspacy", post(extract::extract_symptoms))
        .route("/feedback", post(feedback::submit_feedback))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "diseases": state.ctx.dataset().len(),
        "synonyms": state.ctx.extractor().synonyms().len(),
        "recognizer": state.ctx.extractor().recognizer_name(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}
