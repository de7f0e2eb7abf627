//! Entity-recognition backends
//!
//! A recognizer turns normalized text into labelled entity spans and,
//! optionally, dependency-parse tokens. Two backends ship:
//! - `LexiconRecognizer`: in-process dictionary matcher with negation scoping
//! - `RemoteRecognizer`: HTTP client for an external clinical NER service
//!
//! Recognizers are synchronous and may be slow; callers run them on the
//! blocking pool under a timeout.

mod lexicon;
mod remote;

use serde::Deserialize;
use thiserror::Error;

pub use lexicon::{LexiconRecognizer, BUILTIN_LEXICON};
pub use remote::RemoteRecognizer;

/// Errors a recognizer backend can report
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid recognizer response: {0}")]
    InvalidResponse(String),

    #[error("Recognizer timed out after {0}ms")]
    Timeout(u128),

    #[error("Recognizer failed: {0}")]
    Internal(String),
}

/// Category assigned to a recognized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityLabel {
    #[serde(alias = "PROBLEM")]
    Problem,
    #[serde(alias = "SYMPTOM")]
    Symptom,
    #[serde(alias = "SIGN")]
    Sign,
    #[serde(alias = "FINDING")]
    Finding,
    #[serde(alias = "TREATMENT")]
    Treatment,
    #[serde(alias = "TEST")]
    Test,
    #[serde(other)]
    Other,
}

impl EntityLabel {
    /// Whether the label denotes a problem, symptom, sign or finding
    pub fn is_symptom_like(self) -> bool {
        matches!(
            self,
            EntityLabel::Problem | EntityLabel::Symptom | EntityLabel::Sign | EntityLabel::Finding
        )
    }
}

/// Recognized entity span
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    #[serde(default, alias = "is_negated")]
    pub negated: bool,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
            negated: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Lowercased, trimmed surface text
    pub fn term(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Universal part-of-speech tags that can name a symptom
const SYMPTOM_POS: &[&str] = &["NOUN", "ADJ"];

/// Dependency relations that mark a subject or modifier
const SYMPTOM_DEPS: &[&str] = &["nsubj", "nmod", "amod"];

/// Dependency-parse token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParseToken {
    pub text: String,
    #[serde(default, alias = "upos")]
    pub pos: String,
    #[serde(default)]
    pub deps: Vec<String>,
}

impl ParseToken {
    /// Noun/adjective governed by a subject or modifier relation
    pub fn is_symptom_candidate(&self) -> bool {
        SYMPTOM_POS.contains(&self.pos.as_str())
            && self.deps.iter().any(|d| SYMPTOM_DEPS.contains(&d.as_str()))
            && !self.text.trim().is_empty()
    }
}

/// Recognizer output for one text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub tokens: Vec<ParseToken>,
}

impl Analysis {
    /// Terms flagged as negated by the backend
    pub fn negated_terms(&self) -> impl Iterator<Item = String> + '_ {
        self.entities.iter().filter(|e| e.negated).map(Entity::term)
    }
}

/// Clinical entity-recognition backend
pub trait EntityRecognizer: Send + Sync {
    /// Short backend name for logs and health output
    fn name(&self) -> &str;

    /// Analyze normalized text
    fn recognize(&self, text: &str) -> Result<Analysis, RecognizerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_filter() {
        assert!(EntityLabel::Problem.is_symptom_like());
        assert!(EntityLabel::Finding.is_symptom_like());
        assert!(!EntityLabel::Treatment.is_symptom_like());
        assert!(!EntityLabel::Other.is_symptom_like());
    }

    #[test]
    fn test_analysis_deserializes_partial_payload() {
        let json = r#"{"entities": [
            {"text": "Fever", "label": "PROBLEM_UNUSED"},
            {"text": "cough", "label": "symptom", "is_negated": true}
        ]}"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.entities.len(), 2);
        assert_eq!(analysis.entities[0].label, EntityLabel::Other);
        assert!(analysis.entities[1].negated);
        assert!(analysis.tokens.is_empty());
        assert_eq!(analysis.negated_terms().collect::<Vec<_>>(), vec!["cough"]);
    }

    #[test]
    fn test_parse_token_candidate() {
        let token = ParseToken {
            text: "swollen".to_string(),
            pos: "ADJ".to_string(),
            deps: vec!["amod".to_string()],
        };
        assert!(token.is_symptom_candidate());

        let verb = ParseToken {
            text: "have".to_string(),
            pos: "VERB".to_string(),
            deps: vec!["root".to_string()],
        };
        assert!(!verb.is_symptom_candidate());
    }
}
