//! Invoice number extraction.

use super::patterns::{INVOICE_HEADING, INVOICE_NUMBER};
use super::{capture_trimmed, Candidate, CandidateChain, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Invoice number extractor.
pub struct InvoiceNumberExtractor {
    chain: CandidateChain,
}

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        let chain = CandidateChain::new()
            .then(Candidate::per_line("labeled", config.invoice_window, |line| {
                capture_trimmed(&INVOICE_NUMBER, line)
            }))
            // Every line this matches also satisfies "labeled" over the same
            // window, so it never wins; kept as the last resort of the cascade.
            .then(Candidate::per_line("heading", config.invoice_window, |line| {
                capture_trimmed(&INVOICE_HEADING, line)
            }));
        Self { chain }
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[String]) -> Option<Self::Output> {
        self.chain.evaluate(lines)
    }
}

/// Extract the invoice number from normalized lines.
pub fn extract_invoice_number(lines: &[String]) -> Option<String> {
    InvoiceNumberExtractor::new().extract(lines).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Option<String> {
        extract_invoice_number(&[line.to_string()])
    }

    #[test]
    fn test_labeled_forms() {
        assert_eq!(one("Invoice #: 1001"), Some("1001".to_string()));
        assert_eq!(one("Invoice No. INV-2024-07"), Some("INV-2024-07".to_string()));
        assert_eq!(one("invoice number - a17"), Some("a17".to_string()));
        assert_eq!(one("INVOICE 5521"), Some("5521".to_string()));
    }

    #[test]
    fn test_bare_heading_has_no_number() {
        assert_eq!(one("INVOICE"), None);
        assert_eq!(one("Thank you"), None);
    }

    #[test]
    fn test_earliest_line_wins() {
        let doc = vec![
            "ACME SUPPLY".to_string(),
            "Invoice # 77".to_string(),
            "Invoice # 88".to_string(),
        ];
        let found = InvoiceNumberExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "77");
        assert_eq!(found.line, 1);
    }

    #[test]
    fn test_heading_fallback_is_shadowed_by_labeled() {
        let extractor = InvoiceNumberExtractor::new();
        for doc in [
            vec!["INVOICE 5521".to_string()],
            vec!["ACME".to_string(), "PAID INVOICE A-77".to_string()],
            vec!["Remit to: 12 Main St".to_string(), "INVOICE\t9001".to_string()],
        ] {
            let found = extractor.extract(&doc).unwrap();
            assert_eq!(found.rule, "labeled");
        }
    }

    #[test]
    fn test_window() {
        let mut doc: Vec<String> = (0..80).map(|i| format!("row {}", i)).collect();
        doc.push("Invoice # 9".to_string());
        assert_eq!(extract_invoice_number(&doc), None);
    }
}
