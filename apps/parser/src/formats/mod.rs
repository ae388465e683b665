//! Format adapters: byte → text conversion, one adapter per document format.
//!
//! Adapters are registered in an `AdapterRegistry` and selected by
//! capability (`can_handle`) rather than by a match on the MIME string, so a
//! new format is a new `FormatAdapter` impl plus one `register` call.
//!
//! Adapters work on in-memory byte slices only and never touch the
//! filesystem or network.

mod legacy_doc;
mod package;
mod pages;
mod pdf;
mod rtf;
mod text;
mod xml;

use std::sync::Arc;

use crate::parsing::error::ParseError;
use crate::parsing::models::{ExtractedText, RawDocument};

pub use legacy_doc::LegacyDocAdapter;
pub use pages::PagesAdapter;
pub use pdf::PdfAdapter;
pub use rtf::RtfAdapter;
pub use text::{MarkdownAdapter, PlainTextAdapter};
pub use xml::{DocxAdapter, OdtAdapter};

pub const PDF: &str = "application/pdf";
pub const MSWORD: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const RTF: &str = "application/rtf";
pub const PLAIN_TEXT: &str = "text/plain";
pub const ODT: &str = "application/vnd.oasis.opendocument.text";
pub const MARKDOWN: &str = "text/markdown";
pub const PAGES: &str = "application/x-iwork-pages-sffpages";

/// MIME types the upload boundary accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] =
    &[PDF, MSWORD, DOCX, RTF, PLAIN_TEXT, ODT, MARKDOWN, PAGES];

/// A byte → text converter for one family of document formats.
pub trait FormatAdapter: Send + Sync {
    fn name(&self) -> &str;

    /// `mime_type` is already normalized (see [`normalize_mime`]).
    fn can_handle(&self, mime_type: &str) -> bool;

    /// Returns the document's plain text. An empty string means the document
    /// has no text; unparseable input is `ParseError::CorruptDocument`.
    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError>;
}

/// Lower-cases a MIME type and drops parameters such as `; charset=utf-8`.
pub fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether the raw-text fallback may be used for an unhandled type.
fn fallback_allowed(mime_type: &str) -> bool {
    mime_type.starts_with("text/") || ACCEPTED_MIME_TYPES.contains(&mime_type)
}

/// Ordered set of adapters plus the raw-text fallback.
///
/// Lookup scans from the most recently registered adapter, so registering an
/// adapter for an already-covered type overrides the built-in one.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn FormatAdapter>>,
    fallback: Option<Arc<dyn FormatAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.adapter_names())
            .field("fallback", &self.fallback.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}

impl AdapterRegistry {
    /// A registry with no adapters and no fallback.
    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
            fallback: None,
        }
    }

    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(PlainTextAdapter));
        registry.register(Arc::new(MarkdownAdapter));
        registry.register(Arc::new(RtfAdapter));
        registry.register(Arc::new(LegacyDocAdapter));
        registry.register(Arc::new(OdtAdapter));
        registry.register(Arc::new(DocxAdapter));
        registry.register(Arc::new(PdfAdapter));
        registry.register(Arc::new(PagesAdapter::new(Arc::new(PdfAdapter))));
        registry.set_fallback(Arc::new(PlainTextAdapter));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn FormatAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn set_fallback(&mut self, adapter: Arc<dyn FormatAdapter>) {
        self.fallback = Some(adapter);
    }

    pub fn adapter_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Picks the adapter for `mime_type`, falling back to raw text for
    /// `text/*` and accepted boundary types.
    pub fn resolve(&self, mime_type: &str) -> Result<&dyn FormatAdapter, ParseError> {
        let normalized = normalize_mime(mime_type);

        if let Some(adapter) = self
            .adapters
            .iter()
            .rev()
            .find(|a| a.can_handle(&normalized))
        {
            return Ok(adapter.as_ref());
        }

        match &self.fallback {
            Some(fallback) if fallback_allowed(&normalized) => Ok(fallback.as_ref()),
            _ => Err(ParseError::unsupported(normalized)),
        }
    }

    pub fn extract(&self, document: RawDocument<'_>) -> Result<ExtractedText, ParseError> {
        let adapter = self.resolve(document.declared_mime_type)?;
        let plain_text = adapter.extract(document.bytes)?;
        Ok(ExtractedText {
            plain_text,
            source_mime_type: normalize_mime(document.declared_mime_type),
        })
    }
}
