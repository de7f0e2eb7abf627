//! Startup errors
//!
//! Everything that can go wrong before the server accepts requests is
//! fatal; request-time failures degrade instead and never reach here.

use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::extraction::recognizer::RecognizerError;
use crate::search::SynonymError;

/// Result type for process startup
pub type StartupResult<T> = Result<T, StartupError>;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Synonym table error: {0}")]
    Synonyms(#[from] SynonymError),

    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
