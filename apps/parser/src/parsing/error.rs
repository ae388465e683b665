use thiserror::Error;

/// Failure modes of a single pipeline invocation.
///
/// Every variant is a deterministic outcome of the input bytes, so none of
/// them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unsupported format: no adapter for '{mime_type}'")]
    UnsupportedFormat { mime_type: String },

    #[error("Corrupt {format} document: {reason}")]
    CorruptDocument { format: String, reason: String },

    #[error("No extractable text found in document")]
    EmptyExtraction,
}

impl ParseError {
    pub fn unsupported(mime_type: impl Into<String>) -> Self {
        ParseError::UnsupportedFormat {
            mime_type: mime_type.into(),
        }
    }

    pub fn corrupt(format: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::CorruptDocument {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ParseError::CorruptDocument { .. } => "CORRUPT_DOCUMENT",
            ParseError::EmptyExtraction => "EMPTY_EXTRACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(ParseError::unsupported("x/y").kind(), "UNSUPPORTED_FORMAT");
        assert_eq!(ParseError::corrupt("PDF", "bad").kind(), "CORRUPT_DOCUMENT");
        assert_eq!(ParseError::EmptyExtraction.kind(), "EMPTY_EXTRACTION");
    }

    #[test]
    fn test_display_includes_context() {
        let err = ParseError::corrupt("DOCX", "missing word/document.xml");
        assert_eq!(
            err.to_string(),
            "Corrupt DOCX document: missing word/document.xml"
        );
        let err = ParseError::unsupported("application/vnd.ms-powerpoint");
        assert!(err.to_string().contains("application/vnd.ms-powerpoint"));
    }
}
