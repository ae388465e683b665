//! PDF text-layer extraction via `pdf-extract`.
//!
//! Image-only PDFs (scans) parse fine and yield no text; that is reported
//! downstream as an empty extraction rather than as a corrupt document.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::formats::FormatAdapter;
use crate::parsing::error::ParseError;

const FORMAT: &str = "PDF";

/// Both markers must sit within the first (header) or last (trailer) KiB.
const MARKER_SEARCH_WINDOW: usize = 1024;

pub struct PdfAdapter;

impl FormatAdapter for PdfAdapter {
    fn name(&self) -> &str {
        "pdf"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        mime_type == super::PDF
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        if !has_pdf_header(bytes) {
            return Err(ParseError::corrupt(FORMAT, "missing %PDF- header"));
        }
        if !has_eof_marker(bytes) {
            return Err(ParseError::corrupt(FORMAT, "truncated file, no %%EOF trailer"));
        }

        // pdf-extract panics on some malformed content streams.
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ParseError::corrupt(FORMAT, e.to_string())),
            Err(_) => Err(ParseError::corrupt(
                FORMAT,
                "text extraction aborted on malformed content",
            )),
        }
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(MARKER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

fn has_eof_marker(bytes: &[u8]) -> bool {
    let window = &bytes[bytes.len().saturating_sub(MARKER_SEARCH_WINDOW)..];
    window.windows(5).any(|w| w == b"%%EOF")
}
