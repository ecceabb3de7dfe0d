//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Malformed or rejected request.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// CSV or ZIP export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while decoding an incoming request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Only `POST` is accepted.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request was not tagged as JSON content.
    #[error("Expected application/json")]
    NotJson,

    /// The body could not be parsed as JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// The `base64` payload field is missing or blank.
    #[error("Missing base64")]
    MissingPayload,

    /// The decoded payload exceeds the configured limit.
    #[error("Payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl RequestError {
    /// HTTP status code reported for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            Self::NotJson => 415,
            Self::InvalidJson(_) | Self::MissingPayload => 400,
            Self::PayloadTooLarge { .. } => 413,
            // Undecodable payloads surface as pipeline failures.
            Self::Base64(_) => 500,
        }
    }
}

/// Errors related to CSV and ZIP export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// ZIP writer failure.
    #[error("ZIP packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Buffer flush failure.
    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),

    /// Encoded CSV was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl InvexError {
    /// HTTP status code reported when this error ends a request.
    pub fn status(&self) -> u16 {
        match self {
            Self::Request(e) => e.status(),
            _ => 500,
        }
    }
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_statuses_are_distinct_for_client_errors() {
        assert_eq!(RequestError::NotJson.status(), 415);
        assert_eq!(RequestError::MissingPayload.status(), 400);
        assert_eq!(RequestError::MethodNotAllowed("GET".into()).status(), 405);
    }

    #[test]
    fn test_pipeline_errors_are_server_errors() {
        let err = InvexError::from(PdfError::TextExtraction("bad xref".into()));
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "PDF error: failed to extract text: bad xref");
    }

    #[test]
    fn test_request_errors_keep_their_message() {
        let err = InvexError::from(RequestError::MissingPayload);
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "Missing base64");
    }
}
