//! PDF text extraction.
//!
//! Thin wrapper over the `pdf-extract` crate: the extracted text is the
//! ordered concatenation of per-page text (pages separated by form feeds),
//! with no structural markup retained.

use std::path::Path;

use remitex_core::RemitexError;
use tracing::debug;

/// Plain text pulled out of one document.
#[derive(Debug)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
}

/// Magic-byte check for PDF content.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}

/// Extract all text from the PDF at `path`, page by page in document order.
///
/// A document that parses but yields no text (typically a scanned image
/// PDF) is reported as `EmptyDocument` rather than forwarded as an empty
/// prompt.
pub fn extract_text(path: &Path) -> Result<ExtractedDocument, RemitexError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| RemitexError::ExtractionFailed(e.to_string()))?;

    // pdf-extract separates pages with form feeds.
    let page_count = text.split('\x0C').count();

    if text.trim().is_empty() {
        return Err(RemitexError::EmptyDocument);
    }

    debug!(
        path = %path.display(),
        pages = page_count,
        chars = text.len(),
        "Extracted PDF text"
    );

    Ok(ExtractedDocument { text, page_count })
}
