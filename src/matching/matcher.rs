//! Overlap scoring and ranking against the dataset

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::types::{Dataset, DiseaseRecord, SymptomSet};

/// Datasets larger than this are scored in parallel
pub const PARALLEL_MATCH_THRESHOLD: usize = 1000;

/// Fewer input terms than this never reach the dataset
pub const MIN_INPUT_TERMS: usize = 2;

/// Ranking thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Records below this overlap are discarded
    pub min_overlap: f64,
    /// A top overlap strictly above this is a confident single match
    pub confident: f64,
    /// Maximum candidates in a multi-candidate answer
    pub max_candidates: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            min_overlap: 0.5,
            confident: 0.8,
            max_candidates: 5,
        }
    }
}

/// Overlap of the input against one disease record
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub record: &'a DiseaseRecord,
    /// |common| / |disease symptoms|
    pub overlap: f64,
    pub common: SymptomSet,
    /// Disease symptoms absent from the input
    pub missing: SymptomSet,
    /// Input symptoms absent from the disease
    pub extra: SymptomSet,
}

impl<'a> MatchResult<'a> {
    /// Score `input` against `record`
    ///
    /// The denominator is the disease's symptom count, never the input's.
    /// Records always carry at least one symptom (enforced at load).
    pub fn score(input: &SymptomSet, record: &'a DiseaseRecord) -> Self {
        let common: SymptomSet = input.intersection(&record.symptoms).cloned().collect();
        let missing: SymptomSet = record.symptoms.difference(input).cloned().collect();
        let extra: SymptomSet = input.difference(&record.symptoms).cloned().collect();
        let overlap = if record.symptoms.is_empty() {
            0.0
        } else {
            common.len() as f64 / record.symptoms.len() as f64
        };

        Self {
            record,
            overlap,
            common,
            missing,
            extra,
        }
    }

    /// Overlap as a percentage rounded to one decimal
    pub fn percent_overlap(&self) -> f64 {
        (self.overlap * 1000.0).round() / 10.0
    }
}

/// Outcome of matching one input set
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision<'a> {
    /// Input had too few terms; the dataset was not consulted
    TooFewSymptoms,
    /// No record reached the minimum overlap
    NoMatch,
    /// Top record is above the confidence threshold
    Confident(MatchResult<'a>),
    /// Best records, highest overlap first
    Candidates(Vec<MatchResult<'a>>),
}

/// Score every record and keep those at or above `min_overlap`, best first
///
/// Ties keep dataset order.
pub fn rank<'a>(
    input: &SymptomSet,
    dataset: &'a Dataset,
    thresholds: &MatchThresholds,
) -> Vec<MatchResult<'a>> {
    let keep = |m: &MatchResult<'_>| m.overlap >= thresholds.min_overlap;

    let mut ranked: Vec<MatchResult<'a>> = if dataset.len() > PARALLEL_MATCH_THRESHOLD {
        // Rayon collect keeps dataset order
        dataset
            .records()
            .par_iter()
            .map(|record| MatchResult::score(input, record))
            .filter(keep)
            .collect()
    } else {
        dataset
            .records()
            .iter()
            .map(|record| MatchResult::score(input, record))
            .filter(keep)
            .collect()
    };

    // Stable sort: equal overlaps stay in load order
    ranked.sort_by(|a, b| b.overlap.partial_cmp(&a.overlap).unwrap_or(Ordering::Equal));
    ranked
}

/// Match an input symptom set against the dataset
pub fn match_symptoms<'a>(
    input: &SymptomSet,
    dataset: &'a Dataset,
    thresholds: &MatchThresholds,
) -> MatchDecision<'a> {
    if input.len() < MIN_INPUT_TERMS {
        return MatchDecision::TooFewSymptoms;
    }

    let mut ranked = rank(input, dataset, thresholds);
    let top_overlap = match ranked.first() {
        Some(top) => top.overlap,
        None => return MatchDecision::NoMatch,
    };

    if top_overlap > thresholds.confident {
        MatchDecision::Confident(ranked.swap_remove(0))
    } else {
        ranked.truncate(thresholds.max_candidates);
        MatchDecision::Candidates(ranked)
    }
}
