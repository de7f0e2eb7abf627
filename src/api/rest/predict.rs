//! Prediction endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use super::MSG_PREDICT_FAILED;
use crate::api::state::AppState;
use crate::types::{PredictRequest, PredictionResponse};

/// POST /predict - Extract symptoms and rank matching diseases
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Json<PredictionResponse> {
    info!(
        symptoms = %request.symptoms,
        extra = request.extra.as_deref().unwrap_or(""),
        "Received prediction request"
    );

    // A panic inside the pipeline surfaces as a JoinError
    let ctx = Arc::clone(&state.ctx);
    let task = tokio::spawn(async move { ctx.predict(&request).await });

    match task.await {
        Ok(response) => Json(response),
        Err(e) => {
            error!(error = %e, "Prediction failed");
            Json(PredictionResponse::error(MSG_PREDICT_FAILED))
        }
    }
}
