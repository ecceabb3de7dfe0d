//! CSV and ZIP export of extracted invoices.

pub mod archive;
pub mod tables;

pub use archive::{build_zip, download_filename, sanitize_filename_part, InvoiceArchive};
pub use tables::{header_csv, lines_csv, HEADER_COLUMNS, LINE_COLUMNS};
