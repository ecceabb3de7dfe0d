//! Request/response boundary: base64 PDF in, ZIP download out.

mod envelope;

pub use envelope::{
    ConvertRequest, RequestEvent, ResponseEnvelope, CONTENT_TYPE_JSON, CONTENT_TYPE_ZIP,
};

use std::time::Instant;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::{debug, info, warn};

use crate::error::{InvexError, RequestError, Result};
use crate::export::InvoiceArchive;
use crate::invoice::{ExtractionResult, InvoiceParser, TextInvoiceParser};
use crate::models::config::InvexConfig;
use crate::pdf::{PdfExtractor, TextExtractor};

const LENIENT_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_CONFIG);

/// URL-safe alphabet, padding optional.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_CONFIG);

/// Decode standard or URL-safe base64, padded or not, ignoring whitespace.
pub fn decode_base64(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    LENIENT
        .decode(&compact)
        .or_else(|_| LENIENT_URL_SAFE.decode(&compact))
}

/// Exact decoded length of a whitespace-free base64 string.
fn decoded_len(compact: &str) -> usize {
    compact.trim_end_matches('=').len() * 3 / 4
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub extraction: ExtractionResult,
    pub archive: InvoiceArchive,
}

/// Converts base64 PDF requests into ZIP downloads.
pub struct ConvertService<E: TextExtractor = PdfExtractor> {
    config: InvexConfig,
    extractor: E,
    parser: TextInvoiceParser,
}

impl ConvertService<PdfExtractor> {
    /// Service backed by the PDF extractor.
    pub fn new(config: InvexConfig) -> Self {
        let extractor = PdfExtractor::with_config(config.pdf.clone());
        Self::with_extractor(config, extractor)
    }
}

impl<E: TextExtractor> ConvertService<E> {
    pub fn with_extractor(config: InvexConfig, extractor: E) -> Self {
        let parser = TextInvoiceParser::with_config(&config.extraction);
        Self {
            config,
            extractor,
            parser,
        }
    }

    pub fn config(&self) -> &InvexConfig {
        &self.config
    }

    /// Handle a raw JSON event.
    pub fn handle_json(&self, raw: &str) -> ResponseEnvelope {
        match serde_json::from_str::<RequestEvent>(raw) {
            Ok(event) => self.handle(&event),
            Err(e) => {
                let err = RequestError::InvalidJson(e.to_string());
                warn!("Rejected event: {}", err);
                ResponseEnvelope::error(err.status(), &err.to_string())
            }
        }
    }

    /// Handle a request event. Never fails; errors become error envelopes.
    pub fn handle(&self, event: &RequestEvent) -> ResponseEnvelope {
        let result = self
            .decode_request(event)
            .map_err(InvexError::from)
            .and_then(|pdf| self.convert(&pdf));

        match result {
            Ok(conversion) => {
                info!(
                    "Returning {} ({} bytes)",
                    conversion.archive.filename,
                    conversion.archive.bytes.len()
                );
                ResponseEnvelope::zip(&conversion.archive)
            }
            Err(e) => {
                let status = e.status();
                if status >= 500 {
                    warn!("Conversion failed: {}", e);
                } else {
                    debug!("Rejected request ({}): {}", status, e);
                }
                ResponseEnvelope::error(status, &e.to_string())
            }
        }
    }

    /// Validate the event and decode the embedded document bytes.
    pub fn decode_request(&self, event: &RequestEvent) -> std::result::Result<Vec<u8>, RequestError> {
        if let Some(method) = event.http_method.as_deref() {
            if !method.eq_ignore_ascii_case("POST") {
                return Err(RequestError::MethodNotAllowed(method.to_string()));
            }
        }

        if !event.is_json() {
            return Err(RequestError::NotJson);
        }

        let body = match event.body.as_deref() {
            Some(body) if event.is_base64_encoded => {
                let raw =
                    decode_base64(body).map_err(|e| RequestError::InvalidJson(e.to_string()))?;
                String::from_utf8(raw).map_err(|e| RequestError::InvalidJson(e.to_string()))?
            }
            Some(body) => body.to_string(),
            None => String::from("{}"),
        };

        let request: ConvertRequest =
            serde_json::from_str(&body).map_err(|e| RequestError::InvalidJson(e.to_string()))?;

        let payload = request
            .base64
            .as_deref()
            .map(strip_data_url)
            .filter(|p| !p.trim().is_empty())
            .ok_or(RequestError::MissingPayload)?;

        // Reject before decoding; line breaks carry no payload.
        let limit = self.config.service.max_payload_bytes;
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let estimate = decoded_len(&compact);
        if estimate > limit {
            return Err(RequestError::PayloadTooLarge {
                size: estimate,
                limit,
            });
        }

        let bytes = decode_base64(&compact)?;
        if bytes.len() > limit {
            return Err(RequestError::PayloadTooLarge {
                size: bytes.len(),
                limit,
            });
        }

        debug!(
            "Decoded {} byte document{}",
            bytes.len(),
            request
                .filename
                .as_deref()
                .map(|f| format!(" ({})", f))
                .unwrap_or_default()
        );
        Ok(bytes)
    }

    /// Run extraction, parsing and packaging over raw document bytes.
    pub fn convert(&self, document: &[u8]) -> Result<Conversion> {
        let start = Instant::now();

        let text = self.extractor.extract_text(document)?;
        let mut extraction = self.parser.parse(&text);
        let archive = InvoiceArchive::from_invoice(&extraction.invoice, &self.config.export)?;

        let elapsed = start.elapsed().as_millis() as u64;
        extraction.processing_time_ms = elapsed;
        extraction.invoice.metadata.processing_time_ms = Some(elapsed);

        info!(
            "Converted invoice: {} line items, {} warnings in {}ms",
            extraction.invoice.line_items.len(),
            extraction.warnings.len(),
            elapsed
        );
        Ok(Conversion {
            extraction,
            archive,
        })
    }
}

/// Strip a `data:<mime>;base64,` prefix when present.
pub fn strip_data_url(payload: &str) -> &str {
    let trimmed = payload.trim_start();
    if trimmed.starts_with("data:") {
        if let Some(idx) = trimmed.find(";base64,") {
            return &trimmed[idx + ";base64,".len()..];
        }
    }
    payload
}
