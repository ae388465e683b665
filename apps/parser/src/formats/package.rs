//! ZIP container helpers shared by the DOCX, ODT and Pages adapters.

use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::parsing::error::ParseError;

pub(crate) type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Upper bound on the inflated size of a single package part.
pub(crate) const MAX_PART_BYTES: u64 = 32 * 1024 * 1024;

pub(crate) fn open<'a>(bytes: &'a [u8], format: &str) -> Result<Package<'a>, ParseError> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ParseError::corrupt(format, format!("not a valid ZIP package: {e}")))
}

/// Reads an entry's raw bytes; `Ok(None)` when the entry does not exist.
/// Parts inflating past [`MAX_PART_BYTES`] are corrupt.
pub(crate) fn read_bytes(
    package: &mut Package<'_>,
    name: &str,
    format: &str,
) -> Result<Option<Vec<u8>>, ParseError> {
    read_bytes_capped(package, name, format, MAX_PART_BYTES)
}

fn read_bytes_capped(
    package: &mut Package<'_>,
    name: &str,
    format: &str,
    limit: u64,
) -> Result<Option<Vec<u8>>, ParseError> {
    let mut entry = match package.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(ParseError::corrupt(
                format,
                format!("failed to open '{name}': {e}"),
            ))
        }
    };

    let too_large = || ParseError::corrupt(format, format!("'{name}' expands beyond {limit} bytes"));
    if entry.size() > limit {
        return Err(too_large());
    }

    // The declared size can lie; never inflate more than one byte past the cap.
    let mut buffer = Vec::new();
    entry
        .by_ref()
        .take(limit + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| ParseError::corrupt(format, format!("failed to read '{name}': {e}")))?;
    if buffer.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(Some(buffer))
}

/// Reads an entry as UTF-8 text; `Ok(None)` when the entry does not exist.
pub(crate) fn read_text(
    package: &mut Package<'_>,
    name: &str,
    format: &str,
) -> Result<Option<String>, ParseError> {
    match read_bytes(package, name, format)? {
        Some(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ParseError::corrupt(format, format!("'{name}' is not valid UTF-8"))),
        None => Ok(None),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Builds an in-memory ZIP package from `(name, contents)` pairs.
    pub(crate) fn build_package(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::build_package;
    use super::*;

    #[test]
    fn test_read_existing_and_missing_entries() {
        let bytes = build_package(&[("a.txt", b"alpha".as_slice())]);
        let mut package = open(&bytes, "ZIP").unwrap();
        assert_eq!(
            read_text(&mut package, "a.txt", "ZIP").unwrap().as_deref(),
            Some("alpha")
        );
        assert_eq!(read_text(&mut package, "b.txt", "ZIP").unwrap(), None);
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let err = open(b"definitely not a zip", "DOCX").err().unwrap();
        assert!(matches!(err, ParseError::CorruptDocument { ref format, .. } if format == "DOCX"));
    }

    #[test]
    fn test_oversized_part_is_corrupt() {
        let big = vec![b'a'; 4096];
        let bytes = build_package(&[("word/document.xml", big.as_slice())]);
        let mut package = open(&bytes, "DOCX").unwrap();

        let err = read_bytes_capped(&mut package, "word/document.xml", "DOCX", 1024).unwrap_err();
        assert_eq!(
            err,
            ParseError::corrupt("DOCX", "'word/document.xml' expands beyond 1024 bytes")
        );

        let exact = read_bytes_capped(&mut package, "word/document.xml", "DOCX", 4096).unwrap();
        assert_eq!(exact.map(|b| b.len()), Some(4096));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let bytes = build_package(&[("bad.xml", [0xffu8, 0xfe, 0x00].as_slice())]);
        let mut package = open(&bytes, "ODT").unwrap();
        assert!(read_text(&mut package, "bad.xml", "ODT").is_err());
    }
}
