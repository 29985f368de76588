//! PDF text extraction.
//!
//! Pages are walked in order with `lopdf`; each page's text items are joined
//! with single spaces and every page ends with a newline. When the walk finds
//! no text at all (some font encodings defeat it) the whole document gets a
//! second chance through `pdf-extract` before we give up.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

use super::ExtractError;

#[derive(Debug, Error)]
enum PdfParseError {
    #[error("lopdf: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("document is encrypted")]
    Encrypted,
}

pub fn read_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::EmptyPdf);
    }

    let text = match extract_pages(bytes) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            debug!("page walk found no text, retrying with pdf-extract");
            extract_whole_document(bytes).unwrap_or_default()
        }
        Err(e) => {
            warn!("PDF parsing error: {e}");
            return Err(ExtractError::CorruptedPdf);
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoPdfText);
    }

    Ok(text)
}

fn extract_pages(bytes: &[u8]) -> Result<String, PdfParseError> {
    let doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        return Err(PdfParseError::Encrypted);
    }

    let mut text = String::new();
    for page_number in doc.get_pages().into_keys() {
        let raw = doc.extract_text(&[page_number])?;
        text.push_str(&join_items(&raw));
        text.push('\n');
    }
    Ok(text)
}

fn extract_whole_document(bytes: &[u8]) -> Option<String> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(raw)) => Some(format!("{}\n", join_items(&raw))),
        Ok(Err(e)) => {
            debug!("pdf-extract failed: {e}");
            None
        }
        Err(_) => {
            warn!("pdf-extract panicked while reading document");
            None
        }
    }
}

/// Collapses the text items of one page onto a single line.
fn join_items(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
