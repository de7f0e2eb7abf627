//! Data types for the symptom checker
//!
//! This module contains the core data structures shared by extraction,
//! matching and the HTTP layer.

mod disease;
mod error;
mod response;

use std::collections::BTreeSet;

pub use disease::{Dataset, DiseaseRecord};
pub use error::{StartupError, StartupResult};
pub use response::{
    Candidate, ExtractRequest, ExtractResponse, FeedbackRequest, FeedbackResponse,
    PredictRequest, PredictionResponse,
};

/// Set of normalized symptom terms (lowercase, trimmed, longer than 2 chars)
///
/// Ordered so that serialized output is stable between runs.
pub type SymptomSet = BTreeSet<String>;

/// Minimum number of characters a term needs to count as a symptom
pub const MIN_TERM_LEN: usize = 3;

/// Check whether a term is long enough to be kept
pub fn is_usable_term(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_LEN
}

/// Build a SymptomSet from string slices (test and fixture helper)
pub fn symptom_set<I, S>(terms: I) -> SymptomSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| is_usable_term(t))
        .collect()
}
