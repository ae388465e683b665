//! Apple Pages packages.
//!
//! Current Pages documents store the body as protobuf (`.iwa`) streams, but
//! most ship a `QuickLook/Preview.pdf` rendering whose text layer we can read.
//! Pre-2013 packages keep the body in `index.xml` instead.

use std::sync::Arc;

use crate::formats::{package, xml, FormatAdapter};
use crate::parsing::error::ParseError;

const FORMAT: &str = "Pages";
const PREVIEW_PDF: &str = "QuickLook/Preview.pdf";
const LEGACY_INDEX: &str = "index.xml";

pub struct PagesAdapter {
    pdf: Arc<dyn FormatAdapter>,
}

impl PagesAdapter {
    /// `pdf` reads the embedded preview.
    pub fn new(pdf: Arc<dyn FormatAdapter>) -> Self {
        Self { pdf }
    }
}

impl FormatAdapter for PagesAdapter {
    fn name(&self) -> &str {
        "pages"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        matches!(mime_type, super::PAGES | "application/vnd.apple.pages")
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let mut archive = package::open(bytes, FORMAT)?;

        if let Some(preview) = package::read_bytes(&mut archive, PREVIEW_PDF, FORMAT)? {
            return self.pdf.extract(&preview);
        }

        if let Some(index) = package::read_text(&mut archive, LEGACY_INDEX, FORMAT)? {
            let doc = xml::parse_xml(&index, FORMAT)?;
            let root = doc.root_element();
            let body = root
                .descendants()
                .find(|n| n.is_element() && n.tag_name().name() == "text-body")
                .unwrap_or(root);

            let mut out = String::new();
            xml::collect_paragraph_text(body, &mut out);
            return Ok(xml::finish(out));
        }

        // Text only in IWA protobuf streams: no preview, no legacy index.
        Err(ParseError::unsupported(super::PAGES))
    }
}
