//! DOCX and ODT adapters. Both are ZIP packages whose body is a single XML
//! part; text is recovered by walking that part with `roxmltree`.

use roxmltree::{Document, Node};

use crate::formats::package;
use crate::formats::FormatAdapter;
use crate::parsing::error::ParseError;

const DOCX_FORMAT: &str = "DOCX";
const ODT_FORMAT: &str = "ODT";

/// WordprocessingML (`.docx`). Also answers to the non-standard
/// `application/docx` type some clients send.
pub struct DocxAdapter;

impl FormatAdapter for DocxAdapter {
    fn name(&self) -> &str {
        "docx"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        matches!(mime_type, super::DOCX | "application/docx")
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let mut archive = package::open(bytes, DOCX_FORMAT)?;
        let xml = package::read_text(&mut archive, "word/document.xml", DOCX_FORMAT)?
            .ok_or_else(|| ParseError::corrupt(DOCX_FORMAT, "missing word/document.xml"))?;
        let doc = parse_xml(&xml, DOCX_FORMAT)?;

        let mut out = String::new();
        walk_docx(doc.root_element(), &mut out);
        Ok(finish(out))
    }
}

fn walk_docx(node: Node<'_, '_>, out: &mut String) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or_default()),
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            "p" => {
                walk_docx(child, out);
                out.push('\n');
            }
            // Properties, field codes and deleted runs carry no visible text.
            "pPr" | "rPr" | "sectPr" | "instrText" | "del" => {}
            _ => walk_docx(child, out),
        }
    }
}

/// OpenDocument Text (`.odt`).
pub struct OdtAdapter;

impl FormatAdapter for OdtAdapter {
    fn name(&self) -> &str {
        "odt"
    }

    fn can_handle(&self, mime_type: &str) -> bool {
        mime_type == super::ODT
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let mut archive = package::open(bytes, ODT_FORMAT)?;
        let xml = package::read_text(&mut archive, "content.xml", ODT_FORMAT)?
            .ok_or_else(|| ParseError::corrupt(ODT_FORMAT, "missing content.xml"))?;
        let doc = parse_xml(&xml, ODT_FORMAT)?;

        let body = doc
            .root_element()
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "body")
            .ok_or_else(|| ParseError::corrupt(ODT_FORMAT, "content.xml has no office:body"))?;

        let mut out = String::new();
        walk_odt(body, &mut out, false);
        Ok(finish(out))
    }
}

/// Text nodes count only inside `text:p` / `text:h`; whitespace between
/// block elements is formatting.
fn walk_odt(node: Node<'_, '_>, out: &mut String, in_paragraph: bool) {
    for child in node.children() {
        if child.is_text() {
            if in_paragraph {
                out.push_str(child.text().unwrap_or_default());
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "h" | "p" => {
                walk_odt(child, out, true);
                out.push('\n');
            }
            "s" => {
                let count = child
                    .attributes()
                    .find(|a| a.name() == "c")
                    .and_then(|a| a.value().parse::<usize>().ok())
                    .unwrap_or(1);
                out.extend(std::iter::repeat(' ').take(count));
            }
            "tab" => out.push('\t'),
            "line-break" => out.push('\n'),
            "annotation" | "tracked-changes" | "sequence-decls" => {}
            _ => walk_odt(child, out, in_paragraph),
        }
    }
}

/// Text nodes of the whole subtree, paragraphs (`p`) ending with a newline.
/// Used for the legacy Pages `index.xml` layout.
pub(crate) fn collect_paragraph_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or_default());
        } else if child.is_element() {
            collect_paragraph_text(child, out);
            if child.tag_name().name() == "p" {
                out.push('\n');
            }
        }
    }
}

pub(crate) fn parse_xml<'a>(xml: &'a str, format: &str) -> Result<Document<'a>, ParseError> {
    Document::parse(xml).map_err(|e| ParseError::corrupt(format, format!("malformed XML: {e}")))
}

/// Trims trailing whitespace of every line and of the whole text.
pub(crate) fn finish(text: String) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
