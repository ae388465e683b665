//! Contact extractor: first email and first North-American phone number.
//!
//! Runs over the raw extracted text rather than sentence units, because the
//! normalizer would cut an address that ends a sentence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::models::ContactInfo;

// `(?-u)` keeps `\w`, `\d` and `\s` ASCII-only.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)[\w.-]+@[\w.-]+\.\w+").expect("Email regex pattern is valid and should compile")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)(\+\d{1,2}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")
        .expect("Phone regex pattern is valid and should compile")
});

/// Leftmost match wins for both fields.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text),
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}
