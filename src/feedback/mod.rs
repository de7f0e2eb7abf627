//! Append-only feedback log
//!
//! Each submission becomes one CSV row `symptoms,disease,Yes|No`. Appends
//! are serialized by a mutex and written with a single `write_all`
//! followed by fsync, so concurrent submissions never interleave.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::types::FeedbackRequest;

/// Result type for feedback persistence
pub type FeedbackResult<T> = Result<T, FeedbackError>;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Feedback log backed by a CSV file
#[derive(Debug)]
pub struct FeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode one feedback row as a CSV line
    fn encode(feedback: &FeedbackRequest) -> FeedbackResult<Vec<u8>> {
        let verdict = if feedback.correct { "Yes" } else { "No" };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record([feedback.symptoms.as_str(), feedback.disease.as_str(), verdict])?;
        writer.into_inner().map_err(|e| FeedbackError::Io(e.into_error()))
    }

    /// Append one feedback row
    pub fn append(&self, feedback: &FeedbackRequest) -> FeedbackResult<()> {
        let line = Self::encode(feedback)?;

        let _guard = self.write_lock.lock();

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;

        // Sync to disk for durability
        file.sync_all()?;

        Ok(())
    }
}
