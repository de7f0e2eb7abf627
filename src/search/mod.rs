//! Synonym expansion for layman symptom phrasing
//!
//! Free text often says "runny nose" where the dataset says "rhinorrhea".
//! The synonym table adds the canonical term next to the layman phrase.

mod synonyms;

pub use synonyms::{SynonymError, SynonymTable, DEFAULT_SYNONYMS};
