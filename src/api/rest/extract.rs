//! Symptom extraction endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use super::MSG_EXTRACT_FAILED;
use crate::api::state::AppState;
use crate::types::{ExtractRequest, ExtractResponse};

/// POST /extract_symptoms - Negation-aware extraction, sorted terms
pub async fn extract_symptoms(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    let ctx = Arc::clone(&state.ctx);
    let task = tokio::spawn(async move { ctx.extract_clinical(&request.text).await });

    match task.await {
        Ok(extraction) => {
            info!(
                status = extraction.status.as_str(),
                count = extraction.symptoms.len(),
                "Extracted symptoms"
            );
            Json(ExtractResponse::Symptoms {
                symptoms: extraction.symptoms.into_iter().collect(),
            })
        }
        Err(e) => {
            error!(error = %e, "Symptom extraction failed");
            Json(ExtractResponse::Error {
                error: MSG_EXTRACT_FAILED.to_string(),
            })
        }
    }
}
