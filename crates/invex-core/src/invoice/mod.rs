//! Invoice field extraction module.

pub mod lines;
mod parser;
pub mod rules;
pub mod table;

pub use lines::normalize_lines;
pub use parser::{ExtractionResult, InvoiceParser, TextInvoiceParser};
pub use table::{locate_table_header, parse_rows, RowAssembler, RowLine, RowState};
