//! Plain text and Markdown adapters.

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};
use pulldown_cmark::{Event, Parser, TagEnd};

use crate::formats::FormatAdapter;
use crate::parsing::error::ParseError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16BE_BOM: &[u8] = b"\xFE\xFF";

/// Decodes text bytes: UTF-8 (BOM optional), UTF-16 with a BOM, otherwise
/// Windows-1252. NUL bytes outside UTF-16 mean the payload is binary.
pub(crate) fn decode_text(bytes: &[u8], format: &str) -> Result<String, ParseError> {
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        return Ok(UTF_16LE.decode_without_bom_handling(rest).0.into_owned());
    }
    if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        return Ok(UTF_16BE.decode_without_bom_handling(rest).0.into_owned());
    }

    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.contains(&0) {
        return Err(ParseError::corrupt(format, "binary content in text document"));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()),
    }
}

/// `text/plain`, and the fallback for unhandled text-like types.
pub struct PlainTextAdapter;

impl FormatAdapter for PlainTextAdapter {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        mime_type == super::PLAIN_TEXT
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        decode_text(bytes, "text")
    }
}

/// Markdown rendered to plain text: markup dropped, block ends become
/// newlines.
pub struct MarkdownAdapter;

impl FormatAdapter for MarkdownAdapter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        matches!(mime_type, super::MARKDOWN | "text/x-markdown")
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let source = decode_text(bytes, "Markdown")?;
        Ok(markdown_to_text(&source))
    }
}

fn markdown_to_text(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for event in Parser::new(source) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                out.push('\n')
            }
            _ => {}
        }
    }

    out.trim().to_string()
}
