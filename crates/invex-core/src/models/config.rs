//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Header field extraction windows.
    pub extraction: ExtractionConfig,

    /// CSV/ZIP export settings.
    pub export: ExportConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Request handling limits.
    pub service: ServiceConfig,
}

/// How many leading lines each header field extractor looks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines scanned for the customer name.
    pub customer_window: usize,

    /// Lines scanned after a bare customer keyword for the name itself.
    pub customer_lookahead: usize,

    /// Lines scanned for the invoice number.
    pub invoice_window: usize,

    /// Lines scanned for a labeled date.
    pub labeled_date_window: usize,

    /// Lines scanned for any bare date.
    pub bare_date_window: usize,

    /// Lines scanned for the sales rep.
    pub rep_window: usize,

    /// Lines scanned for the ZIP code.
    pub zip_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            customer_window: 40,
            customer_lookahead: 4,
            invoice_window: 80,
            labeled_date_window: 80,
            bare_date_window: 50,
            rep_window: 120,
            zip_window: 50,
        }
    }
}

/// Archive layout and naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Archive entry holding the header record.
    pub header_entry: String,

    /// Archive entry holding the line items.
    pub lines_entry: String,

    /// Download name used when customer, rep and invoice are all absent.
    pub fallback_filename: String,

    /// Deflate archive entries instead of storing them.
    pub compress: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            header_entry: "invoice_header.csv".to_string(),
            lines_entry: "invoice_lines.csv".to_string(),
            fallback_filename: "invoice_extract.zip".to_string(),
            compress: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry encrypted documents with an empty user password.
    pub try_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            try_empty_password: true,
        }
    }
}

/// Request handling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Largest decoded PDF accepted, in bytes.
    pub max_payload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
