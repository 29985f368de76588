//! Document text extractor: turns an uploaded CV into plain text.
//!
//! Only `text/plain` and `application/pdf` are accepted. Every failure is an
//! [`ExtractError`] whose `Display` text is safe to show in the page banner;
//! parser internals only ever reach the log.

pub mod pdf;
pub mod text;

use thiserror::Error;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";

/// What browsers send when they have no idea what the file is.
const MIME_UNKNOWN: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
}

impl DocumentKind {
    /// Maps a declared MIME type onto a supported kind. Parameters such as
    /// `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(MIME_TEXT) {
            Some(DocumentKind::PlainText)
        } else if essence.eq_ignore_ascii_case(MIME_PDF) {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// Resolves the kind of an upload. A declared type always wins; the file
    /// extension is only consulted when the browser declared nothing useful.
    pub fn detect(declared_mime: Option<&str>, file_name: &str) -> Option<Self> {
        match declared_mime.map(str::trim) {
            Some(mime) if !mime.is_empty() && !mime.starts_with(MIME_UNKNOWN) => {
                Self::from_mime(mime)
            }
            _ => Self::from_file_name(file_name),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::PlainText => "TXT",
            DocumentKind::Pdf => "PDF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("File type not supported. Please upload a PDF or TXT file.")]
    UnsupportedType,

    #[error("Please choose a PDF or TXT file to upload.")]
    NoFile,

    #[error("The TXT file appears to be empty. Please upload a file with content.")]
    EmptyText,

    #[error("Failed to read the TXT file. It might be corrupted.")]
    CorruptedText,

    #[error("The PDF file appears to be empty.")]
    EmptyPdf,

    #[error("Could not extract any text from the PDF. It might contain only images or be empty.")]
    NoPdfText,

    #[error("Could not read the PDF file. It might be corrupted or in an unsupported format.")]
    CorruptedPdf,

    #[error("We couldn't read the uploaded file. Please try again with a PDF or TXT file under the size limit.")]
    Unreadable,
}

impl ExtractError {
    /// The "could not read this file" error for a given kind.
    pub fn corrupted(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::PlainText => ExtractError::CorruptedText,
            DocumentKind::Pdf => ExtractError::CorruptedPdf,
        }
    }
}

/// Extracts the text of an already-classified document.
///
/// Blocking: PDF parsing is CPU-bound, callers on the async executor should
/// run this through `spawn_blocking`.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::PlainText => text::read_text(bytes),
        DocumentKind::Pdf => pdf::read_pdf(bytes),
    }
}
