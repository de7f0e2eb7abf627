//! Request and response bodies for the HTTP endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /predict`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub symptoms: String,
    #[serde(default)]
    pub extra: Option<String>,
}

/// Body of `POST /extract_symptoms`
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// Body of `POST /feedback`
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub symptoms: String,
    pub disease: String,
    pub correct: bool,
}

/// One ranked candidate in a multi-candidate response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub disease: String,
    pub description: String,
    pub medicines: String,
    pub percent_overlap: f64,
    pub missing_symptoms: Vec<String>,
    pub extra_symptoms: Vec<String>,
}

/// Response of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    /// Too few symptoms, no match, or several candidates
    NeedMoreInfo {
        need_more_info: bool,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        predictions: Option<Vec<Candidate>>,
    },
    /// Single confident prediction
    Match {
        symptoms: String,
        prediction: String,
        description: String,
        medicines: String,
        confidence: f64,
        missing_symptoms: Vec<String>,
        extra_symptoms: Vec<String>,
    },
    Error { error: String },
}

impl PredictionResponse {
    pub fn need_more_info(message: impl Into<String>, predictions: Option<Vec<Candidate>>) -> Self {
        PredictionResponse::NeedMoreInfo {
            need_more_info: true,
            message: message.into(),
            predictions,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PredictionResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_need_more_info(&self) -> bool {
        matches!(self, PredictionResponse::NeedMoreInfo { .. })
    }

    /// Candidates of a need-more-info response, if any
    pub fn candidates(&self) -> Option<&[Candidate]> {
        match self {
            PredictionResponse::NeedMoreInfo {
                predictions: Some(p),
                ..
            } => Some(p),
            _ => None,
        }
    }
}

/// Response of `POST /extract_symptoms`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Symptoms { symptoms: Vec<String> },
    Error { error: String },
}

/// Response of `POST /feedback`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeedbackResponse {
    Saved { message: String },
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_need_more_info_omits_missing_predictions() {
        let response = PredictionResponse::need_more_info("more please", None);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"need_more_info": true, "message": "more please"}));
    }

    #[test]
    fn test_error_shape() {
        let value = serde_json::to_value(PredictionResponse::error("boom")).unwrap();
        assert_eq!(value, json!({"error": "boom"}));
    }

    #[test]
    fn test_predict_request_extra_is_optional() {
        let req: PredictRequest = serde_json::from_str(r#"{"symptoms": "fever"}"#).unwrap();
        assert_eq!(req.symptoms, "fever");
        assert!(req.extra.is_none());
    }
}
