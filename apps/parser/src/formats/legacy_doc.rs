//! Legacy Word (`.doc`): best-effort text recovery.
//!
//! Word 97-2003 files are OLE2 compound documents. Rather than walking the
//! FIB and piece table, this adapter scans the container for runs of
//! readable text, in both UTF-16LE and 8-bit form, and keeps whichever
//! encoding recovered more. Expect some noise (style and font names) next to
//! the body text; the downstream heuristics tolerate it.

use crate::formats::FormatAdapter;
use crate::parsing::error::ParseError;

const FORMAT: &str = "DOC";
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Shorter runs are almost always binary noise.
const MIN_RUN_CHARS: usize = 8;

/// OLE2 directory entries and CompObj identifiers present in every file.
const CONTAINER_NAMES: &[&str] = &[
    "Root Entry",
    "WordDocument",
    "SummaryInformation",
    "DocumentSummaryInformation",
    "CompObj",
    "ObjectPool",
    "0Table",
    "1Table",
    "MSWordDoc",
    "Word.Document.8",
    "Microsoft Word-Dokument",
    "Microsoft Word 97-2003 Document",
    "Microsoft Office Word Document",
];

pub struct LegacyDocAdapter;

impl FormatAdapter for LegacyDocAdapter {
    fn name(&self) -> &str {
        "legacy-doc"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        mime_type == super::MSWORD
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        if !bytes.starts_with(OLE2_MAGIC) {
            return Err(ParseError::corrupt(FORMAT, "not an OLE2 compound document"));
        }

        let wide = utf16_runs(bytes);
        let narrow = byte_runs(bytes);
        let best = if char_count(&wide) >= char_count(&narrow) {
            wide
        } else {
            narrow
        };
        Ok(best.join("\n"))
    }
}

fn char_count(runs: &[String]) -> usize {
    runs.iter().map(|r| r.chars().count()).sum()
}

/// Word marks paragraph ends with `\r`; treat it and `\t` as text.
fn is_text_char(c: char) -> bool {
    c == '\r' || c == '\t' || (!c.is_control() && is_latin_or_punctuation(c))
}

/// Restricting to Latin blocks keeps 8-bit text misread as UTF-16 (which
/// lands in CJK ranges) from counting as recovered text.
fn is_latin_or_punctuation(c: char) -> bool {
    matches!(c as u32, 0x20..=0x24F | 0x2000..=0x206F | 0x20AC)
}

fn utf16_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();

    for pair in bytes.chunks_exact(2) {
        let unit = u16::from_le_bytes([pair[0], pair[1]]);
        match char::from_u32(u32::from(unit)).filter(|c| is_text_char(*c)) {
            Some(c) => current.push(c),
            None => flush_run(&mut current, &mut runs),
        }
    }
    flush_run(&mut current, &mut runs);
    runs
}

fn byte_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();

    for &byte in bytes {
        if byte == b'\r' || byte == b'\t' || (0x20..0x7F).contains(&byte) {
            current.push(byte as char);
        } else {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);
    runs
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    let text = current.replace('\r', "\n");
    let trimmed = text.trim();
    if !CONTAINER_NAMES.contains(&trimmed)
        && trimmed.chars().filter(|c| c.is_alphanumeric()).count() >= MIN_RUN_CHARS
    {
        runs.push(trimmed.to_string());
    }
    current.clear();
}
