//! ZIP packaging of the two CSV tables and download filename derivation.

use std::io::{Cursor, Write};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::tables::{header_csv, lines_csv};
use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::invoice::{HeaderRecord, Invoice};

lazy_static! {
    static ref UNSAFE_FILENAME_RUN: Regex = Regex::new(r"[^A-Za-z0-9.\-]+").unwrap();
}

/// Suffix appended to every derived download name.
const EXTRACT_SUFFIX: &str = "_extract.zip";

/// A packaged extract ready to be sent or written.
#[derive(Debug, Clone)]
pub struct InvoiceArchive {
    /// Suggested download filename.
    pub filename: String,
    /// ZIP container bytes.
    pub bytes: Vec<u8>,
}

impl InvoiceArchive {
    /// Render both CSV tables and package them.
    pub fn from_invoice(invoice: &Invoice, config: &ExportConfig) -> Result<Self, ExportError> {
        let header = header_csv(&invoice.header)?;
        let lines = lines_csv(&invoice.line_items)?;

        let bytes = build_zip(
            &[
                (config.header_entry.as_str(), header.as_bytes()),
                (config.lines_entry.as_str(), lines.as_bytes()),
            ],
            config.compress,
        )?;
        let filename = download_filename(&invoice.header, &config.fallback_filename);

        debug!("Packaged {} ({} bytes)", filename, bytes.len());
        Ok(Self { filename, bytes })
    }
}

/// Write named byte buffers into an in-memory ZIP container.
pub fn build_zip(entries: &[(&str, &[u8])], compress: bool) -> Result<Vec<u8>, ExportError> {
    let method = if compress {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    };
    let options = SimpleFileOptions::default().compression_method(method);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Replace every run of characters outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename_part(value: &str) -> String {
    UNSAFE_FILENAME_RUN.replace_all(value, "_").into_owned()
}

/// `<customer>_<rep>_<invoice>_extract.zip`, skipping absent parts.
pub fn download_filename(header: &HeaderRecord, fallback: &str) -> String {
    let parts: Vec<String> = [&header.customer, &header.rep, &header.invoice]
        .into_iter()
        .flatten()
        .map(|v| sanitize_filename_part(v))
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        return fallback.to_string();
    }
    format!("{}{}", parts.join("_"), EXTRACT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::LineItem;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    #[test]
    fn test_sanitize_filename_part() {
        assert_eq!(sanitize_filename_part("Acme, Inc."), "Acme_Inc.");
        assert_eq!(sanitize_filename_part("INV-42"), "INV-42");
        assert_eq!(sanitize_filename_part("O'Brien / Pat"), "O_Brien_Pat");
    }

    #[test]
    fn test_download_filename() {
        let header = HeaderRecord {
            customer: Some("Acme, Inc.".to_string()),
            rep: Some("Jane Doe".to_string()),
            invoice: Some("1001".to_string()),
            ..Default::default()
        };
        assert_eq!(
            download_filename(&header, "invoice_extract.zip"),
            "Acme_Inc._Jane_Doe_1001_extract.zip"
        );

        let header = HeaderRecord {
            invoice: Some("1001".to_string()),
            zip: Some("62704".to_string()),
            ..Default::default()
        };
        assert_eq!(download_filename(&header, "x.zip"), "1001_extract.zip");

        assert_eq!(
            download_filename(&HeaderRecord::default(), "invoice_extract.zip"),
            "invoice_extract.zip"
        );
    }

    #[test]
    fn test_archive_entries() {
        let invoice = Invoice {
            header: HeaderRecord {
                customer: Some("Acme".to_string()),
                ..Default::default()
            },
            line_items: vec![LineItem::new("LBR", "Labor")],
            ..Default::default()
        };
        let archive = InvoiceArchive::from_invoice(&invoice, &ExportConfig::default()).unwrap();
        assert_eq!(archive.filename, "Acme_extract.zip");

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 2);

        let mut header = String::new();
        zip.by_name("invoice_header.csv")
            .unwrap()
            .read_to_string(&mut header)
            .unwrap();
        assert_eq!(header, "Customer,Rep,Date,Invoice,Zip\nAcme,,,,");

        let mut lines = String::new();
        zip.by_name("invoice_lines.csv")
            .unwrap()
            .read_to_string(&mut lines)
            .unwrap();
        assert_eq!(lines, "Activity,Description,Qty,Rate,Amount\nLBR,Labor,,,");
    }

    #[test]
    fn test_stored_archive() {
        let bytes = build_zip(&[("a.txt", b"hello")], false).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.name(), "a.txt");
        assert_eq!(entry.compression(), CompressionMethod::Stored);
    }
}
