//! Common regex patterns and lookup tables for US invoice extraction.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Customer: "Customer: Acme", "Bill To Acme Corp", "Sold To: ..."
    // A bare "Bill To:" still matches and yields ":".
    pub static ref CUSTOMER_LABELED: Regex = Regex::new(
        r"(?i)^(?:Customer|Bill To|Sold To)\s*:?\s*(.+)$"
    ).unwrap();

    pub static ref CUSTOMER_KEYWORD: Regex = Regex::new(
        r"(?i)(?:Customer|Bill To|Sold To)"
    ).unwrap();

    // Address block labels skipped when looking below a customer keyword
    pub static ref ADDRESS_LABEL: Regex = Regex::new(
        r"(?i)^(?:Address|Phone|Email|Fax|Attn|City|State|Zip)(?::|\s)"
    ).unwrap();

    // Invoice number patterns
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice(?:\s*(?:#|No\.?|Number))?\s*[:\-]?\s*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref INVOICE_HEADING: Regex = Regex::new(
        r"INVOICE\s+([A-Z0-9\-]+)"
    ).unwrap();

    // US dates: M/D/YY, MM-DD-YYYY, ...
    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)(?:Invoice Date|Date)\s*[:\-]?\s*([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})"
    ).unwrap();

    pub static ref DATE_BARE: Regex = Regex::new(
        r"[0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}"
    ).unwrap();

    // Sales rep, terminated by a column gap or end of line
    pub static ref SALES_REP: Regex = Regex::new(
        r"(?i)(?:Sales Rep|Salesperson|Sold By|Rep)\s*[:\-]?\s*([A-Za-z .,'\-]+)(?:\s{2,}|$)"
    ).unwrap();

    // ZIP / ZIP+4
    pub static ref ZIP_CODE: Regex = Regex::new(
        r"\b[0-9]{5}(?:-[0-9]{4})?\b"
    ).unwrap();

    pub static ref STATE_TOKEN: Regex = Regex::new(
        r"\b[A-Z]{2}\b"
    ).unwrap();

    // Rows that end the line-item table
    pub static ref TABLE_STOP: [Regex; 3] = [
        Regex::new(r"(?i)^(?:Subtotal|Sub-Total|Tax|Sales Tax|Total|Balance Due)").unwrap(),
        Regex::new(r"^INVOICE\b").unwrap(),
        Regex::new(r"^Page \d+").unwrap(),
    ];

    // "<qty> <rate> <amount>" at the end of a row. Money is optionally
    // negative, optionally '$'-prefixed, optionally comma-grouped, and has
    // exactly two decimals or none. Digits are ASCII only so every match
    // parses as a Decimal.
    pub static ref ROW_TAIL: Regex = Regex::new(
        r"(?:^|\s)([0-9]+(?:\.[0-9]+)?)\s+(-?\$?(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]{2})?)\s+(-?\$?(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]{2})?)$"
    ).unwrap();

    // Leading activity/code token followed by the description
    pub static ref ACTIVITY_SPLIT: Regex = Regex::new(
        r"^([A-Za-z0-9._\-/]+)\s+(.+)$"
    ).unwrap();

    /// US state, district and territory abbreviations.
    pub static ref US_STATES: HashSet<&'static str> = [
        "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA",
        "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD",
        "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
        "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC",
        "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
        "DC", "PR",
    ]
    .into_iter()
    .collect();
}

/// Whether the line contains a whole-word US state abbreviation.
pub fn has_state_abbreviation(line: &str) -> bool {
    STATE_TOKEN
        .find_iter(line)
        .any(|m| US_STATES.contains(m.as_str()))
}

/// Whether the line ends the line-item table.
pub fn is_table_stop(line: &str) -> bool {
    TABLE_STOP.iter().any(|re| re.is_match(line))
}
