//! Runtime configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::extraction::DEFAULT_RECOGNIZER_TIMEOUT;
use crate::matching::MatchThresholds;

pub const ENV_BIND_ADDR: &str = "SYMPTOM_BIND_ADDR";
pub const ENV_DATASET_PATH: &str = "SYMPTOM_DATASET_PATH";
pub const ENV_SYNONYMS_PATH: &str = "SYMPTOM_SYNONYMS_PATH";
pub const ENV_FEEDBACK_PATH: &str = "SYMPTOM_FEEDBACK_PATH";
pub const ENV_NER_URL: &str = "SYMPTOM_NER_URL";
pub const ENV_NER_TIMEOUT_MS: &str = "SYMPTOM_NER_TIMEOUT_MS";
pub const ENV_NER_DISABLED: &str = "SYMPTOM_NER_DISABLED";
pub const ENV_MIN_OVERLAP: &str = "SYMPTOM_MIN_OVERLAP";
pub const ENV_CONFIDENT_OVERLAP: &str = "SYMPTOM_CONFIDENT_OVERLAP";

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the entity recognizer comes from
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerConfig {
    /// Heuristic extraction only
    Disabled,
    /// In-process lexicon recognizer
    Lexicon,
    /// External NER service
    Remote { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub dataset_path: PathBuf,
    pub synonyms_path: Option<PathBuf>,
    pub feedback_path: PathBuf,
    pub recognizer: RecognizerConfig,
    pub recognizer_timeout: Duration,
    pub thresholds: MatchThresholds,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let resolve = |value: String| {
            let path = PathBuf::from(value);
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let bind_addr = match get(ENV_BIND_ADDR) {
            Some(value) => parse(ENV_BIND_ADDR, value)?,
            None => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let disabled = get(ENV_NER_DISABLED)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let recognizer = match (disabled, get(ENV_NER_URL)) {
            (true, _) => RecognizerConfig::Disabled,
            (false, Some(url)) => RecognizerConfig::Remote { url },
            (false, None) => RecognizerConfig::Lexicon,
        };

        let recognizer_timeout = match get(ENV_NER_TIMEOUT_MS) {
            Some(value) => Duration::from_millis(parse(ENV_NER_TIMEOUT_MS, value)?),
            None => DEFAULT_RECOGNIZER_TIMEOUT,
        };

        let mut thresholds = MatchThresholds::default();
        if let Some(value) = get(ENV_MIN_OVERLAP) {
            thresholds.min_overlap = parse_ratio(ENV_MIN_OVERLAP, value)?;
        }
        if let Some(value) = get(ENV_CONFIDENT_OVERLAP) {
            thresholds.confident = parse_ratio(ENV_CONFIDENT_OVERLAP, value)?;
        }

        Ok(Self {
            bind_addr,
            dataset_path: resolve(get(ENV_DATASET_PATH).unwrap_or_else(|| "symptom_disease.csv".into())),
            synonyms_path: get(ENV_SYNONYMS_PATH).map(resolve),
            feedback_path: resolve(get(ENV_FEEDBACK_PATH).unwrap_or_else(|| "feedback.csv".into())),
            recognizer,
            recognizer_timeout,
            thresholds,
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_ratio(key: &'static str, value: String) -> Result<f64, ConfigError> {
    let ratio: f64 = parse(key, value.clone())?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ConfigError::Invalid {
            key,
            value,
            reason: "must be between 0 and 1".to_string(),
        });
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(Path::new("/srv/app"), |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.dataset_path, PathBuf::from("/srv/app/symptom_disease.csv"));
        assert_eq!(config.feedback_path, PathBuf::from("/srv/app/feedback.csv"));
        assert!(config.synonyms_path.is_none());
        assert_eq!(config.recognizer, RecognizerConfig::Lexicon);
        assert_eq!(config.recognizer_timeout, DEFAULT_RECOGNIZER_TIMEOUT);
        assert_eq!(config.thresholds, MatchThresholds::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (ENV_BIND_ADDR, "127.0.0.1:9000"),
            (ENV_DATASET_PATH, "/data/diseases.csv"),
            (ENV_SYNONYMS_PATH, "conf/synonyms.json"),
            (ENV_NER_URL, "http://ner:8080/analyze"),
            (ENV_NER_TIMEOUT_MS, "150"),
            (ENV_MIN_OVERLAP, "0.4"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.dataset_path, PathBuf::from("/data/diseases.csv"));
        assert_eq!(
            config.synonyms_path,
            Some(PathBuf::from("/srv/app/conf/synonyms.json"))
        );
        assert_eq!(
            config.recognizer,
            RecognizerConfig::Remote {
                url: "http://ner:8080/analyze".to_string()
            }
        );
        assert_eq!(config.recognizer_timeout, Duration::from_millis(150));
        assert_eq!(config.thresholds.min_overlap, 0.4);
        assert_eq!(config.thresholds.confident, 0.8);
    }

    #[test]
    fn test_disabled_wins_over_url() {
        let config = config(&[(ENV_NER_DISABLED, "true"), (ENV_NER_URL, "http://ner")]).unwrap();
        assert_eq!(config.recognizer, RecognizerConfig::Disabled);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[(ENV_NER_TIMEOUT_MS, "soon")]),
            Err(ConfigError::Invalid { key: ENV_NER_TIMEOUT_MS, .. })
        ));
        assert!(config(&[(ENV_CONFIDENT_OVERLAP, "1.5")]).is_err());
        assert!(config(&[(ENV_BIND_ADDR, "localhost")]).is_err());
    }
}
