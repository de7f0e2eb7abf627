//! Layman-to-clinical synonym table

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::extraction::normalize;
use crate::types::{is_usable_term, SymptomSet};

/// Built-in layman phrase → canonical term pairs
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("tummy ache", "abdominal pain"),
    ("runny nose", "rhinorrhea"),
    ("stuffy nose", "nasal congestion"),
    ("high temperature", "fever"),
    ("throwing up", "vomiting"),
    ("upset stomach", "nausea"),
    ("sore throat", "pharyngitis"),
];

#[derive(Error, Debug)]
pub enum SynonymError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid synonym entry: {0:?}")]
    InvalidEntry(String),
}

/// Mapping from layman phrase to canonical medical term
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    entries: BTreeMap<String, String>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_SYNONYMS.iter().copied())
    }
}

impl SynonymTable {
    /// Table with no entries
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from (phrase, canonical) pairs
    ///
    /// Phrases are stored normalized so they line up with normalized input
    /// ("pins and needles" is kept as "pins,needles").
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()), v.as_ref().trim().to_lowercase()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();
        Self { entries }
    }

    /// Load a table from a JSON object file: `{"phrase": "canonical", ...}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SynonymError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON object table
    ///
    /// Rejects entries with a blank canonical term, phrases that normalize
    /// to nothing (e.g. "and"), and phrases that collide after
    /// normalization.
    pub fn from_json_str(content: &str) -> Result<Self, SynonymError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(content)?;

        let mut entries = BTreeMap::new();
        for (phrase, canonical) in raw {
            let key = normalize(&phrase);
            let value = canonical.trim().to_lowercase();
            if key.is_empty() || value.is_empty() {
                return Err(SynonymError::InvalidEntry(phrase));
            }
            if entries.insert(key, value).is_some() {
                return Err(SynonymError::InvalidEntry(phrase));
            }
        }
        Ok(Self { entries })
    }

    /// Canonical term for an exact layman phrase
    pub fn canonical(&self, phrase: &str) -> Option<&str> {
        self.entries.get(&normalize(phrase)).map(String::as_str)
    }

    /// Canonical terms whose layman phrase occurs in the normalized text
    pub fn matches<'a>(&'a self, normalized: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(phrase, _)| normalized.contains(phrase.as_str()))
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Add canonical terms for every layman phrase found in `normalized`
    ///
    /// Returns the number of terms that were not already present.
    pub fn expand_into(&self, normalized: &str, terms: &mut SymptomSet) -> usize {
        let before = terms.len();
        terms.extend(
            self.matches(normalized)
                .filter(|c| is_usable_term(c))
                .map(str::to_string),
        );
        terms.len() - before
    }

    /// All canonical targets
    pub fn canonical_terms(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// All layman phrases
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
