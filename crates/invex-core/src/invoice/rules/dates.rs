//! Date extraction for US invoices.

use super::patterns::{DATE_BARE, DATE_LABELED};
use super::{Candidate, CandidateChain, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Two-digit years at or above this pivot belong to the 1900s.
const CENTURY_PIVOT: u32 = 70;

/// Invoice date extractor producing `MM/DD/YYYY`.
pub struct DateExtractor {
    chain: CandidateChain,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        let chain = CandidateChain::new()
            .then(Candidate::per_line("labeled", config.labeled_date_window, |line| {
                DATE_LABELED
                    .captures(line)
                    .and_then(|caps| normalize_date(&caps[1]))
            }))
            .then(Candidate::per_line("bare", config.bare_date_window, |line| {
                DATE_BARE.find(line).and_then(|m| normalize_date(m.as_str()))
            }));
        Self { chain }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[String]) -> Option<Self::Output> {
        self.chain.evaluate(lines)
    }
}

/// Normalize `M/D/YY`, `MM-DD-YYYY` and similar to `MM/DD/YYYY`.
///
/// Month and day are not range-checked; the input is reshaped, not validated.
pub fn normalize_date(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split(['/', '-']).collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year = parse_year(year)?;

    Some(format!("{:02}/{:02}/{}", month, day, year))
}

fn parse_year(s: &str) -> Option<String> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if s.len() == 2 {
        let year: u32 = s.parse().ok()?;
        let full = if year >= CENTURY_PIVOT { 1900 + year } else { 2000 + year };
        return Some(full.to_string());
    }
    Some(s.to_string())
}

/// Extract the invoice date from normalized lines.
pub fn extract_date(lines: &[String]) -> Option<String> {
    DateExtractor::new().extract(lines).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Option<String> {
        extract_date(&[line.to_string()])
    }

    #[test]
    fn test_labeled_dates() {
        assert_eq!(one("Invoice Date: 3/4/23"), Some("03/04/2023".to_string()));
        assert_eq!(one("Date - 1/1/99"), Some("01/01/1999".to_string()));
        assert_eq!(one("DATE 12-25-2024"), Some("12/25/2024".to_string()));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(normalize_date("1/2/05"), Some("01/02/2005".to_string()));
        assert_eq!(normalize_date("1/2/69"), Some("01/02/2069".to_string()));
        assert_eq!(normalize_date("1/2/70"), Some("01/02/1970".to_string()));
        assert_eq!(normalize_date("10/20/2021"), Some("10/20/2021".to_string()));
    }

    #[test]
    fn test_malformed_dates() {
        assert_eq!(normalize_date("1/2"), None);
        assert_eq!(normalize_date("a/b/c"), None);
        assert_eq!(normalize_date("1/2/3/4"), None);
    }

    #[test]
    fn test_labeled_beats_earlier_bare_date() {
        let doc = vec![
            "Printed 01/05/2024".to_string(),
            "Invoice Date: 02/10/2024".to_string(),
        ];
        let found = DateExtractor::new().extract(&doc).unwrap();
        assert_eq!(found.value, "02/10/2024");
        assert_eq!(found.rule, "labeled");
    }

    #[test]
    fn test_bare_date_window() {
        let mut doc: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
        doc.push("7/4/2024".to_string());
        assert_eq!(extract_date(&doc), None);

        doc.insert(10, "Shipped 7/4/2024".to_string());
        assert_eq!(extract_date(&doc), Some("07/04/2024".to_string()));
    }
}
