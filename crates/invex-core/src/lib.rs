//! Core library for US invoice extraction.
//!
//! This crate provides:
//! - PDF text extraction
//! - Header field rules (customer, rep, date, invoice number, ZIP)
//! - Line item table reassembly from wrapped text rows
//! - CSV and ZIP export
//! - A request/response service turning base64 PDFs into ZIP downloads

pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod service;

pub use error::{ExportError, InvexError, PdfError, RequestError, Result};
pub use export::InvoiceArchive;
pub use invoice::{ExtractionResult, InvoiceParser, TextInvoiceParser};
pub use models::config::InvexConfig;
pub use models::invoice::{ExtractionMetadata, HeaderRecord, Invoice, LineItem};
pub use pdf::{PdfExtractor, PlainText, TextExtractor};
pub use service::{Conversion, ConvertService, RequestEvent, ResponseEnvelope};
