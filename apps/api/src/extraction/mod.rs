//! Text Extractor — turns an uploaded PDF into plain text plus basic metadata.
//!
//! Thin wrapper over `pdf-extract` for the text body and `lopdf` for page
//! count and the Info-dictionary title. All validation happens here, before
//! any LLM call is attempted: oversized, unparsable, and text-empty uploads
//! are rejected with descriptive messages.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File is {actual} bytes, which exceeds the {limit} byte upload limit")]
    TooLarge { actual: usize, limit: usize },

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("No text could be extracted from this PDF")]
    Empty,
}

/// Plain text and basic metadata pulled from an uploaded PDF.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
    pub title: Option<String>,
}

/// Extracts text and metadata from raw PDF bytes.
///
/// Validates the size cap first, then parses. Whitespace-only extraction
/// results count as empty — scanned PDFs without a text layer land here.
pub fn extract_pdf(data: &[u8], max_bytes: usize) -> Result<ExtractedDocument, ExtractError> {
    if data.len() > max_bytes {
        return Err(ExtractError::TooLarge {
            actual: data.len(),
            limit: max_bytes,
        });
    }

    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let text = text.trim().to_string();

    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    // Metadata is best-effort: a PDF that yielded text but has a broken
    // structure still gets stored, just without page count or title.
    let (page_count, title) = read_metadata(data);

    debug!(
        chars = text.len(),
        page_count,
        has_title = title.is_some(),
        "PDF extraction complete"
    );

    Ok(ExtractedDocument {
        text,
        page_count,
        title,
    })
}

/// Reads page count and Info-dict title via lopdf. Returns (0, None) when the
/// document structure cannot be walked.
fn read_metadata(data: &[u8]) -> (usize, Option<String>) {
    let doc = match lopdf::Document::load_mem(data) {
        Ok(d) => d,
        Err(_) => return (0, None),
    };

    let page_count = doc.get_pages().len();
    let title = read_info_title(&doc);

    (page_count, title)
}

fn read_info_title(doc: &lopdf::Document) -> Option<String> {
    let info_ref = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_object(info_ref).ok()?.as_dict().ok()?;
    let raw = match info.get(b"Title").ok()? {
        lopdf::Object::String(bytes, _) => bytes.clone(),
        _ => return None,
    };
    let title = decode_pdf_string(&raw);
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// PDF text strings are either UTF-16BE with a BOM or PDFDocEncoding;
/// the latter is close enough to Latin-1 for titles.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
