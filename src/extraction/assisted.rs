//! Assisted extraction: recognizer output merged with heuristic fallbacks
//!
//! Order of operations for one text:
//! 1. primary terms (symptom-like entities + parse candidates), or the
//!    heuristic split when no analysis is available
//! 2. heuristic merge when fewer than 2 terms were found
//!    (assisted strategy, non-negation profiles only)
//! 3. synonym expansion
//! 4. negation removal (including canonical terms of negated phrases),
//!    then word-level split fallback when fewer than 2 terms remain
//! 5. length filter

use std::sync::Arc;
use std::time::Duration;

use super::heuristic::{split_terms, split_words};
use super::recognizer::{Analysis, EntityRecognizer, RecognizerError};
use super::ExtractionProfile;
use crate::search::SynonymTable;
use crate::types::{is_usable_term, SymptomSet};

/// Below this many terms the fallbacks kick in
pub const MIN_TERMS: usize = 2;

/// Run the recognizer on the blocking pool, bounded by `timeout`
///
/// Panics inside the backend surface as `RecognizerError::Internal`.
/// On timeout the blocking task keeps running to completion in the
/// background; its result is dropped.
pub async fn recognize(
    recognizer: Arc<dyn EntityRecognizer>,
    text: String,
    timeout: Duration,
) -> Result<Analysis, RecognizerError> {
    let task = tokio::task::spawn_blocking(move || recognizer.recognize(&text));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(RecognizerError::Internal(join_error.to_string())),
        Err(_) => Err(RecognizerError::Timeout(timeout.as_millis())),
    }
}

/// Terms the recognizer vouches for: symptom-like entities and
/// noun/adjective parse tokens in subject or modifier position
pub fn primary_terms(analysis: &Analysis) -> SymptomSet {
    let entities = analysis
        .entities
        .iter()
        .filter(|e| e.label.is_symptom_like())
        .map(|e| e.term());
    let tokens = analysis
        .tokens
        .iter()
        .filter(|t| t.is_symptom_candidate())
        .map(|t| t.text.trim().to_lowercase());

    entities.chain(tokens).filter(|t| !t.is_empty()).collect()
}

/// Terms the backend marked negated, plus the canonical term of any
/// negated layman phrase
fn negated_terms(analysis: Option<&Analysis>, synonyms: &SynonymTable) -> SymptomSet {
    let mut negated: SymptomSet = analysis
        .map(|a| a.negated_terms().collect())
        .unwrap_or_default();
    let canonical: Vec<String> = negated
        .iter()
        .filter_map(|t| synonyms.canonical(t))
        .map(str::to_string)
        .collect();
    negated.extend(canonical);
    negated
}

/// Combine recognizer output and fallbacks into the final term set
///
/// `analysis` is `None` for the heuristic strategy. A failed backend call
/// should pass an empty analysis so the assisted fallback chain applies.
/// The result may be empty; the caller applies the default set.
pub fn collect_terms(
    normalized: &str,
    analysis: Option<&Analysis>,
    profile: ExtractionProfile,
    synonyms: &SynonymTable,
) -> SymptomSet {
    let mut terms = match analysis {
        Some(analysis) => primary_terms(analysis),
        None => split_terms(normalized),
    };

    // The heuristic strategy already produced the split terms
    if analysis.is_some() && !profile.filter_negation && terms.len() < MIN_TERMS {
        terms.extend(split_terms(normalized));
    }

    if profile.expand_synonyms {
        synonyms.expand_into(normalized, &mut terms);
    }

    if profile.filter_negation {
        let negated = negated_terms(analysis, synonyms);
        terms.retain(|t| !negated.contains(t));

        if terms.len() < MIN_TERMS {
            let negated_words: SymptomSet = negated
                .iter()
                .flat_map(|t| t.split_whitespace())
                .map(str::to_string)
                .collect();
            terms.extend(
                split_words(normalized)
                    .into_iter()
                    .filter(|w| !negated.contains(w) && !negated_words.contains(w)),
            );
        }
    }

    terms.retain(|t| is_usable_term(t));
    terms
}
