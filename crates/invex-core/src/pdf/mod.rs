//! PDF text extraction.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of the raw text blob a document is parsed from.
pub trait TextExtractor {
    /// Extract all text from a document held in memory.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

/// Pass-through source for documents that are already plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl TextExtractor for PlainText {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        String::from_utf8(data.to_vec()).map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
