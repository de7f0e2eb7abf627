//! Symptom term extraction
//!
//! Turns free text into a `SymptomSet`:
//! - `normalize`: canonical comma-delimited text
//! - `heuristic`: deterministic comma/prefix splitting (always available)
//! - `assisted`: recognizer-backed extraction with fallback chain
//! - `recognizer`: entity-recognition backends
//!
//! Extraction never fails and never returns an empty set. When nothing
//! usable is found the default set is returned and the outcome is marked
//! `ExtractionStatus::Defaulted`.

pub mod assisted;
pub mod heuristic;
pub mod normalize;
pub mod recognizer;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::search::SynonymTable;
use crate::types::SymptomSet;
use recognizer::{Analysis, EntityRecognizer};

pub use normalize::normalize;

/// Returned when extraction finds nothing at all
pub const DEFAULT_SYMPTOMS: &[&str] = &["headache", "fever", "chills"];

/// Default bound on a single recognizer call
pub const DEFAULT_RECOGNIZER_TIMEOUT: Duration = Duration::from_millis(2000);

/// How terms are found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Comma/prefix splitting only
    Heuristic,
    /// Entity recognizer first, heuristic as fallback
    Assisted,
}

/// Strategy plus the optional post-processing steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProfile {
    pub strategy: ExtractionStrategy,
    pub expand_synonyms: bool,
    pub filter_negation: bool,
}

impl ExtractionProfile {
    /// Prediction input: assisted, synonyms, no negation
    pub const fn standard() -> Self {
        Self {
            strategy: ExtractionStrategy::Assisted,
            expand_synonyms: true,
            filter_negation: false,
        }
    }

    /// Extraction endpoint: assisted, synonyms and negation filtering
    pub const fn clinical() -> Self {
        Self {
            strategy: ExtractionStrategy::Assisted,
            expand_synonyms: true,
            filter_negation: true,
        }
    }

    /// Splitting only
    pub const fn heuristic() -> Self {
        Self {
            strategy: ExtractionStrategy::Heuristic,
            expand_synonyms: false,
            filter_negation: false,
        }
    }
}

/// Which path produced an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// The recognizer answered
    Assisted,
    /// No recognizer was requested or configured
    Heuristic,
    /// The recognizer failed or timed out; fallbacks were used
    Degraded { reason: String },
    /// Nothing usable was found; `DEFAULT_SYMPTOMS` was returned
    Defaulted,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Assisted => "assisted",
            ExtractionStatus::Heuristic => "heuristic",
            ExtractionStatus::Degraded { .. } => "degraded",
            ExtractionStatus::Defaulted => "defaulted",
        }
    }
}

/// Result of extracting one text
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub symptoms: SymptomSet,
    pub status: ExtractionStatus,
}

impl Extraction {
    fn finish(symptoms: SymptomSet, status: ExtractionStatus) -> Self {
        if symptoms.is_empty() {
            return Self {
                symptoms: DEFAULT_SYMPTOMS.iter().map(|s| s.to_string()).collect(),
                status: ExtractionStatus::Defaulted,
            };
        }
        Self { symptoms, status }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, ExtractionStatus::Degraded { .. })
    }
}

/// Extraction pipeline shared by all endpoints
pub struct Extractor {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    synonyms: Arc<SynonymTable>,
    timeout: Duration,
}

impl Extractor {
    /// Heuristic-only extractor
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self {
            recognizer: None,
            synonyms,
            timeout: DEFAULT_RECOGNIZER_TIMEOUT,
        }
    }

    /// Use `recognizer` for assisted profiles
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Bound each recognizer call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the configured recognizer, or "none"
    pub fn recognizer_name(&self) -> &str {
        self.recognizer.as_deref().map_or("none", |r| r.name())
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Extract symptom terms from free text
    pub async fn extract(&self, text: &str, profile: ExtractionProfile) -> Extraction {
        let normalized = normalize(text);

        let (analysis, status) = match (profile.strategy, &self.recognizer) {
            (ExtractionStrategy::Assisted, Some(recognizer)) => {
                match assisted::recognize(Arc::clone(recognizer), normalized.clone(), self.timeout)
                    .await
                {
                    Ok(analysis) => (Some(analysis), ExtractionStatus::Assisted),
                    Err(e) => {
                        warn!(
                            recognizer = recognizer.name(),
                            error = %e,
                            "Entity recognition failed, using heuristic fallback"
                        );
                        (
                            Some(Analysis::default()),
                            ExtractionStatus::Degraded {
                                reason: e.to_string(),
                            },
                        )
                    }
                }
            }
            _ => (None, ExtractionStatus::Heuristic),
        };

        let terms = assisted::collect_terms(&normalized, analysis.as_ref(), profile, &self.synonyms);
        let extraction = Extraction::finish(terms, status);

        if extraction.status == ExtractionStatus::Defaulted {
            warn!(input = %normalized, "No symptoms extracted, returning default set");
        }
        debug!(
            status = extraction.status.as_str(),
            count = extraction.symptoms.len(),
            "Extracted symptoms"
        );

        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::recognizer::{LexiconRecognizer, RecognizerError};

    struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _text: &str) -> Result<Analysis, RecognizerError> {
            Err(RecognizerError::Unavailable("offline".to_string()))
        }
    }

    struct SlowRecognizer;

    impl EntityRecognizer for SlowRecognizer {
        fn name(&self) -> &str {
            "slow"
        }

        fn recognize(&self, _text: &str) -> Result<Analysis, RecognizerError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Analysis::default())
        }
    }

    struct PanickingRecognizer;

    impl EntityRecognizer for PanickingRecognizer {
        fn name(&self) -> &str {
            "panicking"
        }

        fn recognize(&self, _text: &str) -> Result<Analysis, RecognizerError> {
            panic!("model crashed")
        }
    }

    fn lexicon_extractor() -> Extractor {
        Extractor::new(Arc::new(SynonymTable::default()))
            .with_recognizer(Arc::new(LexiconRecognizer::new()))
    }

    #[tokio::test]
    async fn test_assisted_extraction() {
        let extraction = lexicon_extractor()
            .extract("I have a fever and a runny nose", ExtractionProfile::standard())
            .await;
        assert_eq!(extraction.status, ExtractionStatus::Assisted);
        assert!(extraction.symptoms.contains("fever"));
        assert!(extraction.symptoms.contains("rhinorrhea"));
    }

    #[tokio::test]
    async fn test_clinical_negation() {
        let extraction = lexicon_extractor()
            .extract("no fever, but chills", ExtractionProfile::clinical())
            .await;
        assert!(!extraction.symptoms.contains("fever"));
        assert!(extraction.symptoms.contains("chills"));
    }

    #[tokio::test]
    async fn test_failure_degrades_to_heuristic() {
        let extractor = Extractor::new(Arc::new(SynonymTable::empty()))
            .with_recognizer(Arc::new(FailingRecognizer));
        let extraction = extractor
            .extract("sneezing, itchy eyes", ExtractionProfile::standard())
            .await;
        assert!(extraction.is_degraded());
        assert!(extraction.symptoms.contains("sneezing"));
        assert!(extraction.symptoms.contains("itchy eyes"));
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_heuristic() {
        let extractor = Extractor::new(Arc::new(SynonymTable::empty()))
            .with_recognizer(Arc::new(SlowRecognizer))
            .with_timeout(Duration::from_millis(20));
        let extraction = extractor
            .extract("sneezing, itchy eyes", ExtractionProfile::standard())
            .await;
        match &extraction.status {
            ExtractionStatus::Degraded { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected degraded, got {:?}", other),
        }
        assert_eq!(extraction.symptoms.len(), 2);
    }

    #[tokio::test]
    async fn test_panic_degrades_to_heuristic() {
        let extractor = Extractor::new(Arc::new(SynonymTable::empty()))
            .with_recognizer(Arc::new(PanickingRecognizer));
        let extraction = extractor
            .extract("sneezing, itchy eyes", ExtractionProfile::standard())
            .await;
        assert!(extraction.is_degraded());
        assert!(extraction.symptoms.contains("sneezing"));
    }

    #[tokio::test]
    async fn test_default_set_when_nothing_found() {
        let extraction = lexicon_extractor()
            .extract("ok, hi", ExtractionProfile::standard())
            .await;
        assert_eq!(extraction.status, ExtractionStatus::Defaulted);
        assert_eq!(extraction.symptoms.len(), 3);
        for term in DEFAULT_SYMPTOMS {
            assert!(extraction.symptoms.contains(*term));
        }
    }

    #[tokio::test]
    async fn test_extraction_never_empty() {
        let extractor = lexicon_extractor();
        for text in ["", "   ", ";;", "a b", "fever"] {
            for profile in [
                ExtractionProfile::standard(),
                ExtractionProfile::clinical(),
                ExtractionProfile::heuristic(),
            ] {
                let extraction = extractor.extract(text, profile).await;
                assert!(!extraction.symptoms.is_empty(), "{:?} {:?}", text, profile);
            }
        }
    }

    #[tokio::test]
    async fn test_heuristic_without_recognizer() {
        let extractor = Extractor::new(Arc::new(SynonymTable::default()));
        assert_eq!(extractor.recognizer_name(), "none");
        let extraction = extractor
            .extract("cough; fever", ExtractionProfile::standard())
            .await;
        assert_eq!(extraction.status, ExtractionStatus::Heuristic);
        assert_eq!(extraction.symptoms.len(), 2);
    }
}
