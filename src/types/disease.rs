//! Disease records and the in-memory dataset

use super::SymptomSet;

/// Placeholder used when a record has no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Placeholder used when a record has no medicines
pub const NO_MEDICINES: &str = "No medicines available";

/// One row of the disease dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseRecord {
    pub disease: String,
    pub symptoms: SymptomSet,
    pub description: Option<String>,
    pub medicines: Option<String>,
}

impl DiseaseRecord {
    /// Create a record without description or medicines
    pub fn new(disease: impl Into<String>, symptoms: SymptomSet) -> Self {
        Self {
            disease: disease.into(),
            symptoms,
            description: None,
            medicines: None,
        }
    }

    /// Attach optional description and medicines (blank values count as absent)
    pub fn with_details(mut self, description: Option<String>, medicines: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self.medicines = medicines.filter(|m| !m.trim().is_empty());
        self
    }

    /// Description or placeholder text
    pub fn description_or_placeholder(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// Medicines or placeholder text
    pub fn medicines_or_placeholder(&self) -> &str {
        self.medicines.as_deref().unwrap_or(NO_MEDICINES)
    }
}

/// Ordered, read-only collection of disease records
///
/// Load order is significant: it breaks ties when ranking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DiseaseRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DiseaseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every distinct symptom term across the dataset
    pub fn vocabulary(&self) -> SymptomSet {
        self.records
            .iter()
            .flat_map(|r| r.symptoms.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::symptom_set;

    #[test]
    fn test_placeholders_for_missing_details() {
        let record = DiseaseRecord::new("Flu", symptom_set(["fever", "cough"]));
        assert_eq!(record.description_or_placeholder(), NO_DESCRIPTION);
        assert_eq!(record.medicines_or_placeholder(), NO_MEDICINES);
    }

    #[test]
    fn test_blank_details_count_as_absent() {
        let record = DiseaseRecord::new("Flu", symptom_set(["fever"]))
            .with_details(Some("  ".to_string()), Some("Rest".to_string()));
        assert!(record.description.is_none());
        assert_eq!(record.medicines_or_placeholder(), "Rest");
    }

    #[test]
    fn test_vocabulary_unions_symptoms() {
        let dataset = Dataset::new(vec![
            DiseaseRecord::new("Flu", symptom_set(["fever", "cough"])),
            DiseaseRecord::new("Cold", symptom_set(["cough", "sneezing"])),
        ]);
        let vocab = dataset.vocabulary();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("sneezing"));
    }
}
