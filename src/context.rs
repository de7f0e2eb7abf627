//! Service context shared by all request handlers
//!
//! Built once at startup and read-only afterwards: the dataset, the
//! synonym table and the recognizer never change while serving.

use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, RecognizerConfig};
use crate::dataset::load_dataset;
use crate::extraction::recognizer::{EntityRecognizer, LexiconRecognizer, RemoteRecognizer};
use crate::extraction::{Extraction, ExtractionProfile, Extractor};
use crate::matching::assemble::MSG_TOO_FEW;
use crate::matching::{assemble, match_symptoms, MatchThresholds};
use crate::search::SynonymTable;
use crate::types::{Dataset, PredictRequest, PredictionResponse, StartupResult};

pub struct ServiceContext {
    dataset: Dataset,
    extractor: Extractor,
    thresholds: MatchThresholds,
}

impl ServiceContext {
    pub fn new(dataset: Dataset, extractor: Extractor, thresholds: MatchThresholds) -> Self {
        Self {
            dataset,
            extractor,
            thresholds,
        }
    }

    /// Load dataset and synonyms and build the configured recognizer
    ///
    /// Must run outside the async runtime when a remote recognizer is
    /// configured.
    pub fn load(config: &AppConfig) -> StartupResult<Self> {
        let dataset = load_dataset(&config.dataset_path)?;

        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTable::from_json_file(path)?,
            None => SynonymTable::default(),
        };
        info!(entries = synonyms.len(), "Loaded synonym table");

        let recognizer: Option<Arc<dyn EntityRecognizer>> = match &config.recognizer {
            RecognizerConfig::Disabled => None,
            RecognizerConfig::Lexicon => {
                let lexicon = LexiconRecognizer::new()
                    .with_terms(dataset.vocabulary())
                    .with_terms(synonyms.canonical_terms())
                    .with_terms(synonyms.phrases().filter(|p| !p.contains(',')));
                info!(terms = lexicon.len(), "Using lexicon recognizer");
                Some(Arc::new(lexicon))
            }
            RecognizerConfig::Remote { url } => {
                let remote = RemoteRecognizer::new(url, config.recognizer_timeout)?;
                info!(url = remote.url(), "Using remote recognizer");
                Some(Arc::new(remote))
            }
        };

        let mut extractor =
            Extractor::new(Arc::new(synonyms)).with_timeout(config.recognizer_timeout);
        if let Some(recognizer) = recognizer {
            extractor = extractor.with_recognizer(recognizer);
        }

        Ok(Self::new(dataset, extractor, config.thresholds))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Extract, match and assemble a prediction
    ///
    /// `symptoms` and `extra` are extracted separately and unioned. A blank
    /// `symptoms` field asks for more detail without consulting the
    /// extractor.
    pub async fn predict(&self, request: &PredictRequest) -> PredictionResponse {
        if request.symptoms.trim().is_empty() {
            return PredictionResponse::need_more_info(MSG_TOO_FEW, None);
        }

        let mut input = self
            .extractor
            .extract(&request.symptoms, ExtractionProfile::standard())
            .await
            .symptoms;

        if let Some(extra) = request.extra.as_deref().filter(|e| !e.trim().is_empty()) {
            let extra = self
                .extractor
                .extract(extra, ExtractionProfile::standard())
                .await;
            input.extend(extra.symptoms);
        }

        let decision = match_symptoms(&input, &self.dataset, &self.thresholds);
        assemble(&input, &decision)
    }

    /// Extraction with negation filtering, for the extraction endpoint
    pub async fn extract_clinical(&self, text: &str) -> Extraction {
        self.extractor.extract(text, ExtractionProfile::clinical()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{symptom_set, DiseaseRecord};

    fn context() -> ServiceContext {
        let dataset = Dataset::new(vec![
            DiseaseRecord::new("Flu", symptom_set(["fever", "cough", "fatigue"])),
            DiseaseRecord::new("Common Cold", symptom_set(["rhinorrhea", "sneezing", "cough"])),
        ]);
        let lexicon = LexiconRecognizer::new().with_terms(dataset.vocabulary());
        let extractor =
            Extractor::new(Arc::new(SynonymTable::default())).with_recognizer(Arc::new(lexicon));
        ServiceContext::new(dataset, extractor, MatchThresholds::default())
    }

    fn request(symptoms: &str, extra: Option<&str>) -> PredictRequest {
        PredictRequest {
            symptoms: symptoms.to_string(),
            extra: extra.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_blank_input_needs_more_info() {
        let response = context().predict(&request("   ", None)).await;
        assert_eq!(response, PredictionResponse::need_more_info(MSG_TOO_FEW, None));
    }

    #[tokio::test]
    async fn test_extra_is_unioned() {
        let ctx = context();
        let response = ctx
            .predict(&request("fever and cough", Some("fatigue")))
            .await;
        match response {
            PredictionResponse::Match {
                prediction,
                confidence,
                ..
            } => {
                assert_eq!(prediction, "Flu");
                assert_eq!(confidence, 1.0);
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_synonyms_reach_matching() {
        let response = context()
            .predict(&request("runny nose, sneezing and cough", None))
            .await;
        match response {
            PredictionResponse::Match { prediction, .. } => assert_eq!(prediction, "Common Cold"),
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_clinical_extraction_drops_negated() {
        let extraction = context().extract_clinical("no cough, but fever").await;
        assert!(extraction.symptoms.contains("fever"));
        assert!(!extraction.symptoms.contains("cough"));
    }
}
