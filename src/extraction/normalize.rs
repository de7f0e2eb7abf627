//! Text normalization
//!
//! Canonicalizes free text into a lowercase, comma-delimited stream of
//! symptom phrases. Total and idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Connective phrases that separate symptoms. Longer phrases come first so
/// the alternation prefers them. Negation cues ("no", "not") are left in
/// place for negation scoping.
static CONNECTIVES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:as well as|accompanied by|along with|in addition to|including|and|with|plus|also|but|or)\b",
    )
    .expect("connective pattern is valid")
});

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;./|:\-_&\r\n]").expect("separator pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static COMMA_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,\s*)+").expect("comma pattern is valid"));

/// Normalize raw symptom text
///
/// ```
/// use symptom_checker::extraction::normalize;
///
/// assert_eq!(normalize("Fever and  Cough; headache."), "fever,cough,headache");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    // Separators and whitespace first: `_` is a word character for `\b`,
    // and multi-word connectives are matched with single spaces
    let text = SEPARATORS.replace_all(&lowered, ",");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = CONNECTIVES.replace_all(&text, ",");
    let text = COMMA_RUNS.replace_all(&text, ",");

    text.trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Split normalized text into its non-empty comma parts
pub fn clauses(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}
