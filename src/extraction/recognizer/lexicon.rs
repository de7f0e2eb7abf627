//! Dictionary-based clinical recognizer
//!
//! Matches known clinical phrases on word boundaries (longest match wins)
//! and scopes NegEx-style negation triggers within a clause.

use std::collections::HashMap;

use super::{Analysis, Entity, EntityLabel, EntityRecognizer, RecognizerError};
use crate::extraction::normalize::clauses;

/// Built-in clinical vocabulary
pub const BUILTIN_LEXICON: &[(&str, EntityLabel)] = &[
    // General
    ("fever", EntityLabel::Symptom),
    ("high fever", EntityLabel::Symptom),
    ("mild fever", EntityLabel::Symptom),
    ("chills", EntityLabel::Symptom),
    ("fatigue", EntityLabel::Symptom),
    ("tiredness", EntityLabel::Symptom),
    ("weakness", EntityLabel::Symptom),
    ("malaise", EntityLabel::Symptom),
    ("sweating", EntityLabel::Symptom),
    ("night sweats", EntityLabel::Symptom),
    ("weight loss", EntityLabel::Finding),
    ("weight gain", EntityLabel::Finding),
    ("loss of appetite", EntityLabel::Symptom),
    ("dehydration", EntityLabel::Problem),
    // Head and neurological
    ("headache", EntityLabel::Symptom),
    ("migraine", EntityLabel::Problem),
    ("dizziness", EntityLabel::Symptom),
    ("confusion", EntityLabel::Symptom),
    ("blurred vision", EntityLabel::Symptom),
    ("numbness", EntityLabel::Symptom),
    ("tingling", EntityLabel::Symptom),
    ("seizure", EntityLabel::Problem),
    ("fainting", EntityLabel::Symptom),
    // Respiratory and ENT
    ("cough", EntityLabel::Symptom),
    ("dry cough", EntityLabel::Symptom),
    ("phlegm", EntityLabel::Sign),
    ("shortness of breath", EntityLabel::Symptom),
    ("breathlessness", EntityLabel::Symptom),
    ("wheezing", EntityLabel::Sign),
    ("chest pain", EntityLabel::Symptom),
    ("sneezing", EntityLabel::Symptom),
    ("runny nose", EntityLabel::Symptom),
    ("stuffy nose", EntityLabel::Symptom),
    ("nasal congestion", EntityLabel::Symptom),
    ("rhinorrhea", EntityLabel::Symptom),
    ("sore throat", EntityLabel::Symptom),
    ("pharyngitis", EntityLabel::Problem),
    ("loss of smell", EntityLabel::Symptom),
    ("loss of taste", EntityLabel::Symptom),
    ("ear pain", EntityLabel::Symptom),
    // Digestive
    ("nausea", EntityLabel::Symptom),
    ("vomiting", EntityLabel::Symptom),
    ("diarrhea", EntityLabel::Symptom),
    ("diarrhoea", EntityLabel::Symptom),
    ("constipation", EntityLabel::Symptom),
    ("abdominal pain", EntityLabel::Symptom),
    ("stomach pain", EntityLabel::Symptom),
    ("bloating", EntityLabel::Symptom),
    ("indigestion", EntityLabel::Symptom),
    ("heartburn", EntityLabel::Symptom),
    // Skin, muscles and joints
    ("rash", EntityLabel::Sign),
    ("skin rash", EntityLabel::Sign),
    ("itching", EntityLabel::Symptom),
    ("hives", EntityLabel::Sign),
    ("jaundice", EntityLabel::Sign),
    ("swelling", EntityLabel::Sign),
    ("swollen glands", EntityLabel::Sign),
    ("muscle pain", EntityLabel::Symptom),
    ("muscle aches", EntityLabel::Symptom),
    ("body aches", EntityLabel::Symptom),
    ("joint pain", EntityLabel::Symptom),
    ("back pain", EntityLabel::Symptom),
    ("stiff neck", EntityLabel::Sign),
    // Cardiovascular and urinary
    ("palpitations", EntityLabel::Symptom),
    ("high blood pressure", EntityLabel::Finding),
    ("low blood pressure", EntityLabel::Finding),
    ("frequent urination", EntityLabel::Symptom),
    ("painful urination", EntityLabel::Symptom),
    ("excessive thirst", EntityLabel::Symptom),
    // Non-symptom categories
    ("paracetamol", EntityLabel::Treatment),
    ("ibuprofen", EntityLabel::Treatment),
    ("antibiotics", EntityLabel::Treatment),
    ("blood test", EntityLabel::Test),
    ("urine test", EntityLabel::Test),
];

/// Words and phrases that negate what follows them in a clause
const NEGATION_TRIGGERS: &[&str] = &[
    "no",
    "not",
    "denies",
    "denied",
    "deny",
    "without",
    "never had",
    "negative for",
    "free of",
    "absence of",
    "ruled out",
];

/// Phrases that look like triggers but do not negate
const PSEUDO_TRIGGERS: &[&str] = &["not only", "no increase", "no change", "not certain"];

/// Words that close an open negation scope
const SCOPE_TERMINATORS: &[&str] = &["however", "although", "though", "except", "yet", "still"];

/// In-process lexicon recognizer
#[derive(Debug, Clone)]
pub struct LexiconRecognizer {
    terms: HashMap<String, EntityLabel>,
    max_words: usize,
}

impl Default for LexiconRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconRecognizer {
    /// Recognizer over the built-in vocabulary
    pub fn new() -> Self {
        let mut recognizer = Self {
            terms: HashMap::new(),
            max_words: 1,
        };
        for (term, label) in BUILTIN_LEXICON {
            recognizer.insert(term, *label);
        }
        recognizer
    }

    /// Add extra problem terms (dataset vocabulary, synonym targets)
    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            let key = term.as_ref().trim().to_lowercase();
            if !key.is_empty() && !self.terms.contains_key(&key) {
                self.insert(&key, EntityLabel::Problem);
            }
        }
        self
    }

    fn insert(&mut self, term: &str, label: EntityLabel) {
        let key = term.split_whitespace().collect::<Vec<_>>().join(" ");
        self.max_words = self.max_words.max(key.split(' ').count());
        self.terms.insert(key, label);
    }

    /// Number of known terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Longest phrase in `words` starting at 0 that the lexicon knows
    fn longest_match(&self, words: &[&str]) -> Option<(usize, EntityLabel)> {
        let upper = self.max_words.min(words.len());
        (1..=upper).rev().find_map(|n| {
            self.terms
                .get(&words[..n].join(" "))
                .map(|label| (n, *label))
        })
    }

    fn scan_clause(&self, clause: &str, entities: &mut Vec<Entity>) {
        let words: Vec<&str> = clause
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let mut negated = false;
        let mut i = 0;
        while i < words.len() {
            let rest = &words[i..];

            if SCOPE_TERMINATORS.contains(&rest[0]) {
                negated = false;
                i += 1;
                continue;
            }
            if let Some(n) = phrase_at(rest, PSEUDO_TRIGGERS) {
                i += n;
                continue;
            }
            if let Some(n) = phrase_at(rest, NEGATION_TRIGGERS) {
                negated = true;
                i += n;
                continue;
            }
            match self.longest_match(rest) {
                Some((n, label)) => {
                    let mut entity = Entity::new(rest[..n].join(" "), label);
                    entity.negated = negated;
                    entities.push(entity);
                    i += n;
                }
                None => i += 1,
            }
        }
    }
}

/// Length in words of the first phrase in `phrases` that starts `words`
fn phrase_at(words: &[&str], phrases: &[&str]) -> Option<usize> {
    phrases.iter().find_map(|phrase| {
        let parts: Vec<&str> = phrase.split(' ').collect();
        (words.len() >= parts.len() && words[..parts.len()] == parts[..]).then_some(parts.len())
    })
}

impl EntityRecognizer for LexiconRecognizer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn recognize(&self, text: &str) -> Result<Analysis, RecognizerError> {
        let mut entities = Vec::new();
        for clause in clauses(text) {
            self.scan_clause(clause, &mut entities);
        }
        Ok(Analysis {
            entities,
            tokens: Vec::new(),
        })
    }
}
