//! Customer (bill-to) name extraction.

use super::patterns::{ADDRESS_LABEL, CUSTOMER_KEYWORD, CUSTOMER_LABELED};
use super::{capture_trimmed, Candidate, CandidateChain, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Customer field extractor.
///
/// Prefers an inline label (`Bill To: Acme`); otherwise takes the first
/// plausible line below a bare `Bill To` / `Customer` / `Sold To` keyword.
/// The window bounds where the keyword may sit, not the lines read below it.
pub struct CustomerExtractor {
    chain: CandidateChain,
}

impl CustomerExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        let lookahead = config.customer_lookahead;
        let keyword_window = config.customer_window;
        let chain = CandidateChain::new()
            .then(Candidate::per_line("labeled", config.customer_window, |line| {
                capture_trimmed(&CUSTOMER_LABELED, line)
            }))
            .then(Candidate::new(
                "below-keyword",
                usize::MAX,
                Box::new(move |lines: &[String]| {
                    name_below_keyword(lines, keyword_window, lookahead)
                }),
            ));
        Self { chain }
    }
}

impl Default for CustomerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[String]) -> Option<Self::Output> {
        self.chain.evaluate(lines)
    }
}

fn name_below_keyword(
    lines: &[String],
    keyword_window: usize,
    lookahead: usize,
) -> Option<(usize, String)> {
    let keyword_line = lines
        .iter()
        .take(keyword_window)
        .position(|l| CUSTOMER_KEYWORD.is_match(l))?;

    lines
        .iter()
        .enumerate()
        .skip(keyword_line + 1)
        .take(lookahead)
        .find(|(_, line)| !ADDRESS_LABEL.is_match(line) && line.chars().count() > 3)
        .map(|(i, line)| (i, line.trim().to_string()))
}

/// Extract the customer name from normalized lines.
pub fn extract_customer(lines: &[String]) -> Option<String> {
    CustomerExtractor::new().extract(lines).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labeled_customer() {
        let doc = lines(&["INVOICE", "Customer: Acme Supply Co."]);
        assert_eq!(extract_customer(&doc), Some("Acme Supply Co.".to_string()));

        let doc = lines(&["sold to   Widget World  "]);
        assert_eq!(extract_customer(&doc), Some("Widget World".to_string()));
    }

    #[test]
    fn test_customer_below_bare_keyword() {
        let doc = lines(&[
            "INVOICE 1001",
            "Bill To",
            "Attn: Receiving",
            "Phone 555-1234",
            "Bob",
            "Globex Corporation",
            "742 Evergreen Terrace",
        ]);
        let found = CustomerExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "Globex Corporation");
        assert_eq!(found.rule, "below-keyword");
        assert_eq!(found.line, 5);
    }

    #[test]
    fn test_customer_lookahead_is_bounded() {
        let doc = lines(&[
            "Bill To",
            "Attn: A",
            "Phone: 1",
            "Fax: 2",
            "Email: x@y.z",
            "Too Far Away Inc",
        ]);
        assert_eq!(extract_customer(&doc), None);
    }

    #[test]
    fn test_bare_label_with_colon_wins_first_pass() {
        let doc = lines(&["Bill To:", "Globex Corporation"]);
        let found = CustomerExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, ":");
        assert_eq!(found.rule, "labeled");
    }

    #[test]
    fn test_lookahead_reads_past_window() {
        let mut doc: Vec<String> = (0..39).map(|i| format!("filler {}", i)).collect();
        doc.push("Ship To / Bill To".to_string());
        doc.push("Globex Corporation".to_string());

        let found = CustomerExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "Globex Corporation");
        assert_eq!(found.line, 40);
    }

    #[test]
    fn test_customer_window() {
        let mut doc: Vec<String> = (0..40).map(|i| format!("filler {}", i)).collect();
        doc.push("Customer: Late Inc".to_string());
        assert_eq!(extract_customer(&doc), None);
    }
}
