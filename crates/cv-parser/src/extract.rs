//! Text Extractor — turns a `RawDocument` into a normalized line stream.
//!
//! PDF pages are extracted individually and joined with a blank line, so a
//! heading that starts a new page still opens its own paragraph downstream.
//! Plain text goes through a decode fallback chain: strict UTF-8, then
//! BOM-sniffed UTF-16, then Latin-1 as a last resort.

use crate::document::{DocumentFormat, RawDocument};
use crate::error::ParseError;

/// One line of extracted text, with its position in the extracted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Zero-based line index in the extracted stream.
    pub index: usize,
    /// Byte offset of the line start in the extracted stream.
    pub byte_offset: usize,
    pub text: String,
}

/// Ordered line sequence produced by the extractor, consumed by the segmenter.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub lines: Vec<SourceLine>,
}

impl TextBlock {
    fn from_text(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0usize;
        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            lines.push(SourceLine {
                index,
                byte_offset: offset,
                text: line.to_string(),
            });
            offset += raw.len() + 1;
        }
        TextBlock { lines }
    }
}

/// Stage 1 of the pipeline. Fails with `Extraction` on an unreadable payload;
/// everything else is returned verbatim for the segmenter.
pub fn extract_text(document: &RawDocument) -> Result<TextBlock, ParseError> {
    let text = match document.format() {
        DocumentFormat::Pdf => extract_pdf(document.bytes())?,
        DocumentFormat::Text => decode_text(document.bytes()),
    };
    tracing::debug!(
        filename = document.filename(),
        chars = text.len(),
        "extracted text"
    );
    Ok(TextBlock::from_text(&text))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ParseError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ParseError::Extraction(format!("malformed PDF stream: {e}")))?;
    // Blank line as the page-boundary marker.
    Ok(pages.join("\n\n"))
}

fn decode_text(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    if let Some(s) = decode_utf16(bytes) {
        return s;
    }
    // Latin-1 is total over bytes; an empty or whitespace-only result is
    // caught later by the assembler, not here.
    bytes.iter().map(|&b| b as char).collect()
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (little_endian, payload) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => return None,
    };
    if payload.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}
