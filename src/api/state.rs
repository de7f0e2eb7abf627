//! Shared application state for HTTP handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::context::ServiceContext;
use crate::feedback::FeedbackLog;

pub struct AppState {
    /// Dataset, extractor and thresholds
    pub ctx: Arc<ServiceContext>,

    /// Feedback log shared by all requests
    pub feedback: Arc<FeedbackLog>,

    /// When the server finished loading
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(ctx: ServiceContext, feedback: FeedbackLog) -> Self {
        Self {
            ctx: Arc::new(ctx),
            feedback: Arc::new(feedback),
            started_at: Utc::now(),
        }
    }
}
