//! HTTP API
//!
//! JSON endpoints for prediction, extraction and feedback, served by axum.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
