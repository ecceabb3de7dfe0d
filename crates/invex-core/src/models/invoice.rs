//! Invoice data models: the header record and reassembled line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A complete extracted invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice-level fields.
    pub header: HeaderRecord,

    /// Line items in source order.
    pub line_items: Vec<LineItem>,

    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

/// The five invoice-level fields, each independently optional.
///
/// `None` means the field was not found; it is rendered as an empty cell
/// only when the record is written to CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// Customer / bill-to name.
    pub customer: Option<String>,

    /// Sales representative.
    pub rep: Option<String>,

    /// Invoice date in `MM/DD/YYYY` form.
    pub date: Option<String>,

    /// Invoice number.
    pub invoice: Option<String>,

    /// US ZIP code (5 digits, optionally `+4`).
    pub zip: Option<String>,
}

impl HeaderRecord {
    /// Names of the fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("customer", &self.customer),
            ("rep", &self.rep),
            ("date", &self.date),
            ("invoice", &self.invoice),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether no field was found at all.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 5
    }
}

/// A single reassembled line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Leading activity/code token (may be empty).
    pub activity: String,

    /// Item description, extended by continuation lines.
    pub description: String,

    /// Quantity.
    pub qty: Option<Decimal>,

    /// Unit rate.
    pub rate: Option<Decimal>,

    /// Line amount.
    pub amount: Option<Decimal>,
}

impl LineItem {
    /// Create an item with no numeric fields.
    pub fn new(activity: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the numeric tail.
    pub fn with_numbers(
        mut self,
        qty: Option<Decimal>,
        rate: Option<Decimal>,
        amount: Option<Decimal>,
    ) -> Self {
        self.qty = qty;
        self.rate = rate;
        self.amount = amount;
        self
    }

    /// Append wrapped text to the description, space-separated.
    pub fn append_description(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(text);
    }

    /// Whether the item carries any numeric field.
    pub fn has_numbers(&self) -> bool {
        self.qty.is_some() || self.rate.is_some() || self.amount.is_some()
    }
}

/// Metadata about a single extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Number of normalized lines.
    pub line_count: usize,

    /// Index of the line-item header row, if one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_header_line: Option<usize>,

    /// Header fields that were not found.
    pub missing_fields: Vec<String>,

    /// Non-fatal extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_append_description() {
        let mut item = LineItem::new("LBR", "Labor");
        item.append_description("  on site ");
        item.append_description("");
        assert_eq!(item.description, "Labor on site");

        let mut empty = LineItem::default();
        empty.append_description("wrapped");
        assert_eq!(empty.description, "wrapped");
    }

    #[test]
    fn test_missing_fields() {
        let header = HeaderRecord {
            customer: Some("Acme".to_string()),
            zip: Some("62704".to_string()),
            ..Default::default()
        };
        assert_eq!(header.missing_fields(), vec!["rep", "date", "invoice"]);
        assert!(!header.is_empty());
        assert!(HeaderRecord::default().is_empty());
    }

    #[test]
    fn test_with_numbers() {
        let item = LineItem::new("A", "B").with_numbers(
            Decimal::from_str("2").ok(),
            None,
            Decimal::from_str("10.00").ok(),
        );
        assert!(item.has_numbers());
        assert!(item.rate.is_none());
        assert!(!LineItem::new("A", "B").has_numbers());
    }
}
