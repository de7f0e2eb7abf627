//! REST handlers
//!
//! - `POST /predict` - Disease prediction from free-text symptoms
//! - `POST /extract_symptoms` - Clinical symptom extraction
//! - `POST /feedback` - Record whether a prediction was correct
//!
//! Handlers never return a non-200 status for request-time failures.
//! Failures are logged and answered with a generic `{"error": ...}` body.

pub mod extract;
pub mod feedback;
pub mod predict;

pub const MSG_PREDICT_FAILED: &str = "An error occurred while processing your request.";
pub const MSG_EXTRACT_FAILED: &str = "Symptom extraction failed";
pub const MSG_FEEDBACK_SAVED: &str = "Feedback saved successfully";
pub const MSG_FEEDBACK_FAILED: &str = "An error occurred while saving your feedback";
