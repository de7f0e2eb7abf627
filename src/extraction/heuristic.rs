//! Deterministic comma/prefix splitting
//!
//! Always available and used as the fallback for every other strategy.

use super::normalize::clauses;
use crate::types::{is_usable_term, SymptomSet};

/// Narrative lead-ins stripped from the front of each part, repeatedly
const NARRATIVE_PREFIXES: &[&str] = &[
    "i have ",
    "i've got ",
    "i am ",
    "i'm ",
    "experiencing ",
    "suffering from ",
    "having ",
    "feeling ",
    "a ",
    "an ",
    "the ",
    "some ",
];

/// Strip every leading narrative prefix from a part
pub fn strip_narrative(part: &str) -> &str {
    let mut rest = part.trim();
    while let Some(stripped) = NARRATIVE_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped.trim_start();
    }
    rest
}

/// Split normalized text into symptom terms
pub fn split_terms(normalized: &str) -> SymptomSet {
    clauses(normalized)
        .map(strip_narrative)
        .filter(|term| is_usable_term(term))
        .map(str::to_string)
        .collect()
}

/// Second-level split: comma parts, with multi-word parts broken into words
pub fn split_words(normalized: &str) -> SymptomSet {
    let mut terms = SymptomSet::new();
    for part in clauses(normalized).filter(|p| is_usable_term(p)) {
        if part.contains(' ') {
            terms.extend(
                part.split_whitespace()
                    .filter(|w| is_usable_term(w))
                    .map(str::to_string),
            );
        } else {
            terms.insert(part.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize;

    #[test]
    fn test_split_terms_strips_prefixes() {
        let terms = split_terms(&normalize(
            "I have a fever and experiencing headaches, suffering from nausea",
        ));
        assert!(terms.contains("fever"));
        assert!(terms.contains("headaches"));
        assert!(terms.contains("nausea"));
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_split_terms_drops_short_tokens() {
        let terms = split_terms("ab,flu,a,cold");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("flu"));
        assert!(terms.contains("cold"));
    }

    #[test]
    fn test_strip_narrative_only_leading() {
        assert_eq!(strip_narrative("i have a runny nose"), "runny nose");
        assert_eq!(strip_narrative("pain i have"), "pain i have");
    }

    #[test]
    fn test_split_words_breaks_phrases() {
        let terms = split_words("no fever,chills,sore throat");
        assert!(terms.contains("fever"));
        assert!(terms.contains("chills"));
        assert!(terms.contains("sore"));
        assert!(terms.contains("throat"));
        assert!(!terms.contains("no"));
    }
}
