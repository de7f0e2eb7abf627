//! HTTP client for an external clinical NER service
//!
//! Contract: `POST {url}` with `{"text": "..."}` returns
//! `{"entities": [{"text", "label", "negated"?}], "tokens": [...]?}`.

use std::time::Duration;

use serde::Serialize;

use super::{Analysis, EntityRecognizer, RecognizerError};

/// Remote entity-recognition backend
pub struct RemoteRecognizer {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

impl RemoteRecognizer {
    /// Create a client for the service at `url`.
    ///
    /// Must be called outside of an async context: the blocking client
    /// owns its own runtime.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RecognizerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecognizerError::Unavailable(e.to_string()))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EntityRecognizer for RemoteRecognizer {
    fn name(&self) -> &str {
        "remote"
    }

    fn recognize(&self, text: &str) -> Result<Analysis, RecognizerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&RecognizeRequest { text })
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RecognizerError::Unavailable(self.url.clone())
                } else if e.is_timeout() {
                    RecognizerError::Timeout(self.timeout.as_millis())
                } else {
                    RecognizerError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognizerError::Http(format!(
                "{} returned status {}",
                self.url,
                status.as_u16()
            )));
        }

        response
            .json::<Analysis>()
            .map_err(|e| RecognizerError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_service_is_an_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let recognizer =
            RemoteRecognizer::new("http://127.0.0.1:9/ner/", Duration::from_millis(300)).unwrap();
        assert_eq!(recognizer.url(), "http://127.0.0.1:9/ner");
        assert!(recognizer.recognize("fever,cough").is_err());
    }
}
