//! Document title resolution
//!
//! The toolbar shows `"{title}.pdf"`. The title comes from the document
//! information dictionary when it has a non-blank `/Title`, otherwise from
//! the file name with its extension stripped, so the label never doubles
//! up as `scan001.pdf.pdf`.

use lopdf::Object;
use slowcore::safety::truncate_chars;
use std::path::Path;

pub const ELLIPSIS: &str = "...";
const UNTITLED: &str = "untitled";

/// Read `/Title` from the trailer's `/Info` dictionary.
///
/// Any parse failure just means "no title"; the caller falls back to the
/// file name.
pub fn metadata_title(bytes: &[u8]) -> Option<String> {
    let doc = match lopdf::Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("metadata unavailable: {}", e);
            return None;
        }
    };

    let info = resolve(&doc, doc.trailer.get(b"Info").ok()?)?;
    let title = resolve(&doc, info.as_dict().ok()?.get(b"Title").ok()?)?;
    match title {
        Object::String(raw, _) => Some(decode_text_string(raw)),
        _ => None,
    }
}

/// Follow one level of indirection.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, UTF-8 with BOM (PDF 2.0),
/// else PDFDocEncoding, which agrees with Latin-1 for printable text.
pub fn decode_text_string(raw: &[u8]) -> String {
    if let Some(rest) = raw.strip_prefix(b"\xFE\xFF") {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = raw.strip_prefix(b"\xEF\xBB\xBF") {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        raw.iter().map(|&b| b as char).collect()
    }
}

/// Pick the display title and shorten it to `max_chars` plus an ellipsis.
pub fn resolve_title(metadata: Option<&str>, path: &Path, max_chars: usize) -> String {
    let title = metadata
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| UNTITLED.to_string());
    truncate_chars(&title, max_chars, ELLIPSIS)
}

/// Text for the title label
pub fn title_label(title: &str) -> String {
    format!("{}.pdf", title)
}
