//! Disease matching and response assembly
//!
//! - `matcher`: asymmetric overlap scoring, filtering and ranking
//! - `assemble`: pure conversion of a decision into a response body

pub mod assemble;
pub mod matcher;

pub use assemble::assemble;
pub use matcher::{match_symptoms, rank, MatchDecision, MatchResult, MatchThresholds};
