//! Disease dataset loading
//!
//! Reads the disease table once at startup. Required columns are
//! `disease` and `symptoms` (comma-joined); `description` and `medicines`
//! are optional. Header names are matched case-insensitively and any
//! other columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::extraction::heuristic::split_terms;
use crate::extraction::normalize;
use crate::types::{Dataset, DiseaseRecord, SymptomSet};

/// Result type for dataset loading
pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Dataset contains no usable rows")]
    Empty,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    disease: usize,
    symptoms: usize,
    description: Option<usize>,
    medicines: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            disease: find("disease").ok_or(DatasetError::MissingColumn("disease"))?,
            symptoms: find("symptoms").ok_or(DatasetError::MissingColumn("symptoms"))?,
            description: find("description"),
            medicines: find("medicines"),
        })
    }
}

/// Parse a comma-joined symptom cell into a SymptomSet
pub fn parse_symptoms(raw: &str) -> SymptomSet {
    split_terms(&normalize(raw))
}

/// Load the dataset from a CSV file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> DatasetResult<Dataset> {
    let path = path.as_ref();
    let dataset = load_from_reader(File::open(path)?)?;
    info!(path = %path.display(), diseases = dataset.len(), "Loaded disease dataset");
    Ok(dataset)
}

/// Load the dataset from any CSV source
pub fn load_from_reader<R: Read>(reader: R) -> DatasetResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(reader.headers()?)?;
    let optional = |record: &csv::StringRecord, index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .map(str::to_string)
    };

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = row + 2;

        let disease = record.get(columns.disease).unwrap_or("").trim();
        if disease.is_empty() {
            warn!(line, "Skipping dataset row without disease name");
            continue;
        }

        let symptoms = parse_symptoms(record.get(columns.symptoms).unwrap_or(""));
        if symptoms.is_empty() {
            warn!(line, disease, "Skipping dataset row without usable symptoms");
            continue;
        }

        records.push(DiseaseRecord::new(disease, symptoms).with_details(
            optional(&record, columns.description),
            optional(&record, columns.medicines),
        ));
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(Dataset::new(records))
}
