//! Text normalizer: cleans extracted text and splits it into sentence units.
//!
//! Boundaries are runs of `.`, `!` or `?` followed by whitespace or the end of
//! the text. There is no abbreviation handling, so "Dr. Smith" yields two
//! units; the classifier tolerates that.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::models::SentenceUnit;

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+(?:\s+|$)").expect("Sentence boundary regex pattern is valid and should compile")
});

/// Splits `text` into ordered, trimmed, non-empty sentence units.
pub fn normalize(text: &str) -> Vec<SentenceUnit> {
    let cleaned = strip_control_chars(text);
    SENTENCE_BOUNDARY
        .split(&cleaned)
        .filter_map(SentenceUnit::new)
        .collect()
}

fn strip_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && !c.is_whitespace() { ' ' } else { c })
        .collect()
}
