//! Feedback endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use super::{MSG_FEEDBACK_FAILED, MSG_FEEDBACK_SAVED};
use crate::api::state::AppState;
use crate::types::{FeedbackRequest, FeedbackResponse};

/// POST /feedback - Append one row to the feedback log
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedbackRequest>,
) -> Json<FeedbackResponse> {
    let log = Arc::clone(&state.feedback);
    let disease = request.disease.clone();
    let correct = request.correct;

    // Blocking file IO (append + fsync)
    let result = tokio::task::spawn_blocking(move || log.append(&request)).await;

    match result {
        Ok(Ok(())) => {
            info!(disease = %disease, correct, "Feedback saved");
            Json(FeedbackResponse::Saved {
                message: MSG_FEEDBACK_SAVED.to_string(),
            })
        }
        Ok(Err(e)) => {
            error!(error = %e, "Failed to save feedback");
            Json(FeedbackResponse::Error {
                error: MSG_FEEDBACK_FAILED.to_string(),
            })
        }
        Err(e) => {
            error!(error = %e, "Feedback task failed");
            Json(FeedbackResponse::Error {
                error: MSG_FEEDBACK_FAILED.to_string(),
            })
        }
    }
}
