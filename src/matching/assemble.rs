//! Turns match decisions into response bodies

use tracing::info;

use super::matcher::{MatchDecision, MatchResult};
use crate::types::{Candidate, PredictionResponse, SymptomSet};

pub const MSG_TOO_FEW: &str = "Please provide more detailed symptoms for a more accurate prediction. You can describe them in natural language.";
pub const MSG_NO_MATCH: &str =
    "No matching diseases found. Please provide more specific symptoms or rephrase them.";
pub const MSG_CANDIDATES: &str = "Found several possible matches. Please provide more specific symptoms to narrow down the diagnosis.";

fn to_vec(set: &SymptomSet) -> Vec<String> {
    set.iter().cloned().collect()
}

fn candidate(m: &MatchResult<'_>) -> Candidate {
    Candidate {
        disease: m.record.disease.clone(),
        description: m.record.description_or_placeholder().to_string(),
        medicines: m.record.medicines_or_placeholder().to_string(),
        percent_overlap: m.percent_overlap(),
        missing_symptoms: to_vec(&m.missing),
        extra_symptoms: to_vec(&m.extra),
    }
}

/// Build the prediction response for `input` and its match decision
pub fn assemble(input: &SymptomSet, decision: &MatchDecision<'_>) -> PredictionResponse {
    let summary = input.iter().cloned().collect::<Vec<_>>().join(", ");
    info!(symptoms = %summary, count = input.len(), "Extracted symptoms for prediction");

    match decision {
        MatchDecision::TooFewSymptoms => PredictionResponse::need_more_info(MSG_TOO_FEW, None),
        MatchDecision::NoMatch => PredictionResponse::need_more_info(MSG_NO_MATCH, Some(Vec::new())),
        MatchDecision::Confident(best) => PredictionResponse::Match {
            symptoms: summary,
            prediction: best.record.disease.clone(),
            description: best.record.description_or_placeholder().to_string(),
            medicines: best.record.medicines_or_placeholder().to_string(),
            confidence: best.overlap,
            missing_symptoms: to_vec(&best.missing),
            extra_symptoms: to_vec(&best.extra),
        },
        MatchDecision::Candidates(list) => PredictionResponse::need_more_info(
            MSG_CANDIDATES,
            Some(list.iter().map(candidate).collect()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::{match_symptoms, MatchThresholds};
    use crate::types::{symptom_set, Dataset, DiseaseRecord};
    use serde_json::json;

    fn flu_dataset() -> Dataset {
        Dataset::new(vec![DiseaseRecord::new(
            "Flu",
            symptom_set(["fever", "cough", "fatigue"]),
        )
        .with_details(Some("Viral infection".to_string()), None)])
    }

    #[test]
    fn test_candidates_shape() {
        let data = flu_dataset();
        let input = symptom_set(["fever", "cough"]);
        let decision = match_symptoms(&input, &data, &MatchThresholds::default());
        let value = serde_json::to_value(assemble(&input, &decision)).unwrap();

        assert_eq!(
            value,
            json!({
                "need_more_info": true,
                "message": MSG_CANDIDATES,
                "predictions": [{
                    "disease": "Flu",
                    "description": "Viral infection",
                    "medicines": "No medicines available",
                    "percent_overlap": 66.7,
                    "missing_symptoms": ["fatigue"],
                    "extra_symptoms": []
                }]
            })
        );
    }

    #[test]
    fn test_confident_shape() {
        let data = flu_dataset();
        let input = symptom_set(["fever", "cough", "fatigue", "chills"]);
        let decision = match_symptoms(&input, &data, &MatchThresholds::default());
        let value = serde_json::to_value(assemble(&input, &decision)).unwrap();

        assert_eq!(value["prediction"], "Flu");
        assert_eq!(value["confidence"], 1.0);
        assert_eq!(value["symptoms"], "chills, cough, fatigue, fever");
        assert_eq!(value["extra_symptoms"], json!(["chills"]));
        assert_eq!(value["missing_symptoms"], json!([]));
        assert!(value.get("need_more_info").is_none());
    }

    #[test]
    fn test_too_few_and_no_match_messages() {
        let too_few = assemble(&symptom_set(["fever"]), &MatchDecision::TooFewSymptoms);
        assert_eq!(
            too_few,
            PredictionResponse::need_more_info(MSG_TOO_FEW, None)
        );

        let no_match = assemble(&symptom_set(["rash", "itching"]), &MatchDecision::NoMatch);
        assert_eq!(no_match.candidates(), Some(&[][..]));
    }
}
