//! Symptom Checker
//!
//! Extracts symptom terms from free text and ranks diseases from a
//! symptom dataset by asymmetric overlap.
//!
//! # Modules
//!
//! - `types`: Core data structures (SymptomSet, DiseaseRecord, request and response bodies)
//! - `extraction`: Text normalization, heuristic and recognizer-assisted extraction
//! - `search`: Layman-to-clinical synonym table
//! - `dataset`: Disease table loading
//! - `matching`: Overlap scoring, ranking and response assembly
//! - `feedback`: Append-only feedback log
//! - `context`: Service context built once at startup
//! - `config`: Environment configuration
//! - `api`: HTTP endpoints
//!
//! # Example
//!
//! ```no_run
//! use symptom_checker::config::AppConfig;
//! use symptom_checker::context::ServiceContext;
//! use symptom_checker::types::PredictRequest;
//!
//! let config = AppConfig::from_env().unwrap();
//! let ctx = ServiceContext::load(&config).unwrap();
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let response = runtime.block_on(ctx.predict(&PredictRequest {
//!     symptoms: "fever, cough and fatigue".to_string(),
//!     extra: None,
//! }));
//! println!("{}", serde_json::to_string(&response).unwrap());
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod dataset;
pub mod extraction;
pub mod feedback;
pub mod matching;
pub mod search;
pub mod types;

// Re-export commonly used items at crate root
pub use config::AppConfig;
pub use context::ServiceContext;
pub use extraction::{Extraction, ExtractionProfile, ExtractionStatus, Extractor};
pub use matching::{MatchDecision, MatchThresholds};
pub use types::{Dataset, DiseaseRecord, PredictionResponse, StartupError, StartupResult, SymptomSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
