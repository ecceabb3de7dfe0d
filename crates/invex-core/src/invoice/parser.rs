//! Invoice parser tying the normalizer, header rules and table reassembly together.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::invoice::{ExtractionMetadata, Invoice};

use super::lines::normalize_lines;
use super::rules::HeaderRules;
use super::table::{locate_table_header, parse_rows};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: Invoice,
    /// Normalized lines the invoice was extracted from.
    pub lines: Vec<String>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
///
/// Parsing never fails: fields that cannot be found are left empty and
/// reported as warnings.
pub trait InvoiceParser {
    /// Parse invoice from extracted text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Heuristic parser for text extracted from US-style invoices.
pub struct TextInvoiceParser {
    rules: HeaderRules,
}

impl TextInvoiceParser {
    /// Create a parser with default scan windows.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            rules: HeaderRules::new(config),
        }
    }

    /// Parse an already normalized line sequence.
    pub fn parse_lines(&self, lines: &[String]) -> Invoice {
        let header = self.rules.extract(lines);
        let table_header_line = locate_table_header(lines);
        let line_items = parse_rows(lines, table_header_line);

        let missing_fields: Vec<String> = header
            .missing_fields()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut warnings: Vec<String> = missing_fields
            .iter()
            .map(|f| format!("Could not extract {}", f))
            .collect();
        match table_header_line {
            None => warnings.push("Could not locate line item table header".to_string()),
            Some(_) if line_items.is_empty() => {
                warnings.push("Line item table has no rows".to_string())
            }
            Some(_) => {}
        }

        Invoice {
            header,
            line_items,
            metadata: ExtractionMetadata {
                line_count: lines.len(),
                table_header_line,
                missing_fields,
                warnings,
                processing_time_ms: None,
            },
        }
    }
}

impl Default for TextInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for TextInvoiceParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing invoice from {} characters of text", text.len());

        let lines = normalize_lines(text);
        let mut invoice = self.parse_lines(&lines);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        invoice.metadata.processing_time_ms = Some(processing_time_ms);

        debug!(
            "Extracted {} line items, table header at {:?}, missing fields {:?}",
            invoice.line_items.len(),
            invoice.metadata.table_header_line,
            invoice.metadata.missing_fields
        );

        ExtractionResult {
            warnings: invoice.metadata.warnings.clone(),
            invoice,
            lines,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const SAMPLE: &str = "ACME PLUMBING SUPPLY\r\n\
        INVOICE\r\n\
        Invoice #: 10452\r\n\
        Invoice Date: 3/4/23\r\n\
        Bill To\r\n\
        Attn: Accounts Payable\r\n\
        Globex Corporation\r\n\
        742 Evergreen Terrace\r\n\
        Springfield, IL 62704\r\n\
        Sales Rep: Jane Doe\u{00a0}\u{00a0}\u{00a0}Terms: Net 30\r\n\
        \r\n\
        ACTIVITY\u{00a0}DESCRIPTION QTY RATE AMOUNT\r\n\
        LBR Labor - site visit 2 50.00 100.00\r\n\
        after hours\r\n\
        PRT Valve, 3/4\" brass 4 $12.50 $50.00\r\n\
        Subtotal 150.00\r\n\
        Tax 9.00\r\n\
        Total $159.00\r\n";

    #[test]
    fn test_parse_sample_invoice() {
        let result = TextInvoiceParser::new().parse(SAMPLE);
        let invoice = &result.invoice;

        assert_eq!(invoice.header.customer.as_deref(), Some("Globex Corporation"));
        assert_eq!(invoice.header.invoice.as_deref(), Some("10452"));
        assert_eq!(invoice.header.date.as_deref(), Some("03/04/2023"));
        assert_eq!(invoice.header.rep.as_deref(), Some("Jane Doe"));
        assert_eq!(invoice.header.zip.as_deref(), Some("62704"));

        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(invoice.line_items[0].description, "Labor - site visit after hours");
        assert_eq!(invoice.line_items[1].activity, "PRT");
        assert_eq!(invoice.line_items[1].description, "Valve, 3/4\" brass");
        assert_eq!(invoice.line_items[1].amount, Some(Decimal::new(5000, 2)));

        assert_eq!(invoice.metadata.table_header_line, Some(10));
        assert!(result.warnings.is_empty());
        assert_eq!(result.lines.len(), 17);
    }

    #[test]
    fn test_parse_without_table() {
        let result = TextInvoiceParser::new().parse("Customer: Solo\nNothing else here");
        assert!(result.invoice.line_items.is_empty());
        assert_eq!(result.invoice.header.customer.as_deref(), Some("Solo"));
        assert!(result
            .warnings
            .contains(&"Could not locate line item table header".to_string()));
        assert!(result.warnings.contains(&"Could not extract zip".to_string()));
    }

    #[test]
    fn test_parse_empty_text() {
        let result = TextInvoiceParser::new().parse("");
        assert!(result.invoice.header.is_empty());
        assert!(result.invoice.line_items.is_empty());
        assert_eq!(result.invoice.metadata.line_count, 0);
    }
}
