//! Resume parsing pipeline.
//!
//! bytes + MIME → [`formats`](crate::formats) adapter → plain text →
//! [`normalizer`] → sentence units → [`classifier`] → buckets, with
//! [`contact`] and [`skills`] reading the text directly, and
//! [`aggregator`] assembling the [`StructuredProfile`].
//!
//! A [`ResumeParser`] is immutable once built, so one instance can serve any
//! number of concurrent callers.

pub mod aggregator;
pub mod classifier;
pub mod contact;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod skills;
pub mod vocabulary;

use crate::formats::AdapterRegistry;

pub use error::ParseError;
pub use models::{ContactInfo, ExtractedText, RawDocument, StructuredProfile};
pub use vocabulary::Vocabulary;

#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    registry: AdapterRegistry,
    vocabulary: Vocabulary,
}

impl ResumeParser {
    pub fn new(registry: AdapterRegistry, vocabulary: Vocabulary) -> Self {
        Self {
            registry,
            vocabulary,
        }
    }

    /// Built-in adapters with a caller-supplied vocabulary.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self::new(AdapterRegistry::with_builtin(), vocabulary)
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Runs only the format adapter stage.
    pub fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<ExtractedText, ParseError> {
        self.registry.extract(RawDocument::new(bytes, mime_type))
    }

    pub fn parse_document(
        &self,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StructuredProfile, ParseError> {
        let extracted = self.extract_text(bytes, mime_type)?;
        self.parse_text(&extracted.plain_text)
    }

    /// The pipeline minus the adapter stage, for already-extracted text.
    pub fn parse_text(&self, text: &str) -> Result<StructuredProfile, ParseError> {
        let units = normalizer::normalize(text);
        if units.is_empty() {
            return Err(ParseError::EmptyExtraction);
        }

        let buckets = classifier::classify_all(&units, self.vocabulary.categories());
        let contact = contact::extract_contact(text);
        let skills = skills::extract_skills(text, self.vocabulary.skills());

        Ok(aggregator::aggregate(contact, buckets, skills))
    }
}

/// [`ResumeParser::parse_document`] with the default adapters and vocabulary.
pub fn parse_document(bytes: &[u8], mime_type: &str) -> Result<StructuredProfile, ParseError> {
    ResumeParser::default().parse_document(bytes, mime_type)
}

/// [`ResumeParser::parse_text`] with the default vocabulary.
pub fn parse_text(text: &str) -> Result<StructuredProfile, ParseError> {
    ResumeParser::default().parse_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_scenario_sections() {
        let profile =
            parse_text("I have a Bachelor degree from MIT. I have 5 years of work experience.")
                .unwrap();
        assert_eq!(profile.education, vec!["I have a Bachelor degree from MIT"]);
        assert_eq!(profile.experience, vec!["I have 5 years of work experience"]);
        assert!(profile.sections.is_empty());
    }

    #[test]
    fn test_parse_text_empty_is_error() {
        assert_eq!(parse_text(""), Err(ParseError::EmptyExtraction));
        assert_eq!(parse_text(" \n\t. ! ?"), Err(ParseError::EmptyExtraction));
    }

    #[test]
    fn test_text_without_matches_is_empty_profile_not_error() {
        let profile = parse_text("Hobbies include chess and hiking.").unwrap();
        assert_eq!(profile, StructuredProfile::default());
    }

    #[test]
    fn test_custom_vocabulary_adds_section() {
        let vocab = Vocabulary::from_toml_str(
            r#"
            skills = ["terraform"]

            [[categories]]
            name = "education"
            keywords = ["degree"]

            [[categories]]
            name = "certifications"
            keywords = ["certified"]
            "#,
        )
        .unwrap();
        let parser = ResumeParser::with_vocabulary(vocab);
        let profile = parser
            .parse_text("Certified Terraform associate. Degree in maths. Python fan.")
            .unwrap();

        assert_eq!(profile.education, vec!["Degree in maths"]);
        assert!(profile.experience.is_empty());
        assert_eq!(profile.skills, vec!["terraform"]);
        assert_eq!(
            profile.sections["certifications"],
            vec!["Certified Terraform associate"]
        );
    }

    #[test]
    fn test_parse_document_plain_text() {
        let profile = parse_document(
            b"Contact me at jane@example.com or call 555-123-4567.",
            "text/plain",
        )
        .unwrap();
        assert_eq!(profile.contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(profile.contact.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_parse_document_unsupported() {
        assert_eq!(
            parse_document(b"\xD0\xCF", "application/vnd.ms-powerpoint"),
            Err(ParseError::unsupported("application/vnd.ms-powerpoint"))
        );
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResumeParser>();
    }
}
