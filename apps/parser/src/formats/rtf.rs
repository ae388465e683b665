//! RTF adapter: a control-word stripper, not a full RTF reader.
//!
//! Handles paragraph/line breaks, tabs, `\'hh` escapes (Windows-1252),
//! `\uN` Unicode escapes with their `\ucN` fallback skipping, typographic
//! symbol words, and skips destinations that hold no body text (font and
//! colour tables, pictures, document info, `\*` groups).

use encoding_rs::WINDOWS_1252;

use crate::formats::FormatAdapter;
use crate::parsing::error::ParseError;

const FORMAT: &str = "RTF";

const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "headerl",
    "headerr",
    "footer",
    "footerl",
    "footerr",
    "fldinst",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
    "xmlnstbl",
    "themedata",
    "colorschememapping",
    "datastore",
    "latentstyles",
    "filetbl",
    "revtbl",
];

pub struct RtfAdapter;

impl FormatAdapter for RtfAdapter {
    fn name(&self) -> &str {
        "rtf"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        matches!(mime_type, super::RTF | "text/rtf")
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let start = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());
        if !bytes[start..].starts_with(b"{\\rtf") {
            return Err(ParseError::corrupt(FORMAT, "missing {\\rtf header"));
        }
        RtfReader::new(&bytes[start..]).read()
    }
}

#[derive(Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Fallback characters following each `\uN`.
    unicode_skip: usize,
}

struct RtfReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    out: String,
    stack: Vec<GroupState>,
    state: GroupState,
    pending_skip: usize,
}

impl<'a> RtfReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            out: String::new(),
            stack: Vec::new(),
            state: GroupState {
                skip: false,
                unicode_skip: 1,
            },
            pending_skip: 0,
        }
    }

    fn read(mut self) -> Result<String, ParseError> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            self.pos += 1;
            match byte {
                b'{' => {
                    self.stack.push(self.state);
                    self.pending_skip = 0;
                }
                b'}' => {
                    self.state = self
                        .stack
                        .pop()
                        .ok_or_else(|| ParseError::corrupt(FORMAT, "unbalanced closing brace"))?;
                    self.pending_skip = 0;
                }
                b'\\' => self.control()?,
                b'\r' | b'\n' => {}
                _ => self.emit_byte(byte),
            }
        }

        if !self.stack.is_empty() {
            return Err(ParseError::corrupt(
                FORMAT,
                format!("{} unterminated group(s)", self.stack.len()),
            ));
        }
        Ok(self.out.trim().to_string())
    }

    fn control(&mut self) -> Result<(), ParseError> {
        let Some(&next) = self.bytes.get(self.pos) else {
            return Err(ParseError::corrupt(FORMAT, "dangling backslash"));
        };

        if !next.is_ascii_alphabetic() {
            self.pos += 1;
            match next {
                b'\\' | b'{' | b'}' => self.emit_byte(next),
                b'\'' => {
                    let byte = self
                        .bytes
                        .get(self.pos..self.pos + 2)
                        .and_then(|hex| std::str::from_utf8(hex).ok())
                        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                        .ok_or_else(|| ParseError::corrupt(FORMAT, "invalid \\' escape"))?;
                    self.pos += 2;
                    self.emit_byte(byte);
                }
                b'*' => self.state.skip = true,
                b'~' => self.emit_char(' '),
                b'_' => self.emit_char('-'),
                b'\r' | b'\n' => self.emit_char('\n'),
                _ => {}
            }
            return Ok(());
        }

        let word_start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphabetic())
        {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.bytes[word_start..self.pos]).unwrap_or_default();

        let param_start = self.pos;
        if self.bytes.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let param = std::str::from_utf8(&self.bytes[param_start..self.pos])
            .ok()
            .and_then(|p| p.parse::<i32>().ok());

        if self.bytes.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        // \binN is followed by N raw bytes that are not RTF syntax.
        if word == "bin" {
            let len = param.unwrap_or(0).max(0) as usize;
            self.pos = self.pos.saturating_add(len).min(self.bytes.len());
            return Ok(());
        }

        self.apply_word(word, param);
        Ok(())
    }

    fn apply_word(&mut self, word: &str, param: Option<i32>) {
        if SKIPPED_DESTINATIONS.contains(&word) {
            self.state.skip = true;
            return;
        }

        match word {
            "par" | "line" | "sect" | "page" | "row" => self.emit_char('\n'),
            "tab" | "cell" => self.emit_char('\t'),
            "emdash" => self.emit_char('\u{2014}'),
            "endash" => self.emit_char('\u{2013}'),
            "bullet" => self.emit_char('\u{2022}'),
            "lquote" => self.emit_char('\u{2018}'),
            "rquote" => self.emit_char('\u{2019}'),
            "ldblquote" => self.emit_char('\u{201C}'),
            "rdblquote" => self.emit_char('\u{201D}'),
            "uc" => self.state.unicode_skip = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(value) = param {
                    // Code points above 32767 are written as negative numbers.
                    let code = if value < 0 { value + 65536 } else { value };
                    let ch = char::from_u32(code as u32).unwrap_or('\u{FFFD}');
                    self.emit_char(ch);
                    self.pending_skip = self.state.unicode_skip;
                }
            }
            _ => {}
        }
    }

    fn emit_byte(&mut self, byte: u8) {
        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }
        if self.state.skip {
            return;
        }
        if byte.is_ascii() {
            self.out.push(byte as char);
        } else {
            let single = [byte];
            self.out
                .push_str(&WINDOWS_1252.decode_without_bom_handling(&single).0);
        }
    }

    fn emit_char(&mut self, ch: char) {
        if !self.state.skip {
            self.out.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Result<String, ParseError> {
        RtfAdapter.extract(source.as_bytes())
    }

    #[test]
    fn test_extracts_body_and_skips_tables() {
        let source = r"{\rtf1\ansi\deff0{\fonttbl{\f0 Times New Roman;}}{\colortbl;\red0\green0\blue0;}
\f0\fs24 Jane Doe\par
Bachelor degree from MIT.\par
}";
        assert_eq!(
            extract(source).unwrap(),
            "Jane Doe\nBachelor degree from MIT."
        );
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        let source = r"{\rtf1\ansi caf\'e9 \u8212? ok\uc0\u8220 quoted\u8221}";
        assert_eq!(
            extract(source).unwrap(),
            "café \u{2014} ok\u{201C}quoted\u{201D}"
        );
    }

    #[test]
    fn test_symbols_and_tabs() {
        let source = r"{\rtf1 A\tab B\line C\emdash D \{x\}}";
        assert_eq!(extract(source).unwrap(), "A\tB\nC\u{2014}D {x}");
    }

    #[test]
    fn test_ignorable_destination_is_skipped() {
        let source = r"{\rtf1 Visible{\*\generator Riched20;}{\*\unknowndest hidden} text}";
        assert_eq!(extract(source).unwrap(), "Visible text");
    }

    #[test]
    fn test_missing_header_is_corrupt() {
        assert_eq!(
            extract("plain text pretending").unwrap_err(),
            ParseError::corrupt("RTF", "missing {\\rtf header")
        );
    }

    #[test]
    fn test_unbalanced_groups_are_corrupt() {
        assert!(matches!(
            extract(r"{\rtf1 truncated {\b bold"),
            Err(ParseError::CorruptDocument { .. })
        ));
        assert!(matches!(
            extract(r"{\rtf1 extra}}"),
            Err(ParseError::CorruptDocument { .. })
        ));
    }

    #[test]
    fn test_binary_payload_is_skipped() {
        let source = r"{\rtf1 Work experience at Acme.{\pict\bin1 }} Bachelor degree.}";
        assert_eq!(
            extract(source).unwrap(),
            "Work experience at Acme. Bachelor degree."
        );

        let mut bytes = br"{\rtf1 Before{\*\blipuid\bin4 ".to_vec();
        bytes.extend_from_slice(&[b'{', 0xff, b'\\', b'}']);
        bytes.extend_from_slice(br"} after}");
        assert_eq!(RtfAdapter.extract(&bytes).unwrap(), "Before after");
    }

    #[test]
    fn test_binary_length_past_end_is_clamped() {
        assert!(matches!(
            extract(r"{\rtf1 text{\pict\bin99 ab"),
            Err(ParseError::CorruptDocument { .. })
        ));
    }

    #[test]
    fn test_negative_unicode_parameter() {
        // \u-3913 is U+F0B7 (a private-use bullet) written as a signed 16-bit value.
        let source = r"{\rtf1 \u-3913?x}";
        assert_eq!(extract(source).unwrap(), "\u{F0B7}x");
    }
}
