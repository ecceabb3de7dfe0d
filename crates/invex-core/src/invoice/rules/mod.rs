//! Rule-based header field extractors for US invoices.
//!
//! Every extractor is an ordered list of [`Candidate`]s. Each candidate scans
//! a bounded window of leading lines; the first candidate that produces a
//! value wins.

pub mod customer;
pub mod dates;
pub mod number;
pub mod patterns;
pub mod postal;
pub mod rep;

pub use customer::{extract_customer, CustomerExtractor};
pub use dates::{extract_date, normalize_date, DateExtractor};
pub use number::{extract_invoice_number, InvoiceNumberExtractor};
pub use patterns::*;
pub use postal::{extract_zip, ZipExtractor};
pub use rep::{extract_rep, RepExtractor};

use crate::models::config::ExtractionConfig;
use crate::models::invoice::HeaderRecord;

/// Trait for header field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the normalized line sequence.
    fn extract(&self, lines: &[String]) -> Option<Self::Output>;
}

/// A value found by a candidate rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Label of the candidate that produced it.
    pub rule: &'static str,
    /// Index of the source line.
    pub line: usize,
}

/// Scan function: returns the line index and value of the first hit.
pub type ScanFn = Box<dyn Fn(&[String]) -> Option<(usize, String)> + Send + Sync>;

/// One strategy in an extractor cascade.
pub struct Candidate {
    label: &'static str,
    window: usize,
    scan: ScanFn,
}

impl Candidate {
    pub fn new(label: &'static str, window: usize, scan: ScanFn) -> Self {
        Self { label, window, scan }
    }

    /// Candidate that applies `matcher` to each line of the window in order.
    pub fn per_line<F>(label: &'static str, window: usize, matcher: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self::new(
            label,
            window,
            Box::new(move |lines: &[String]| {
                lines
                    .iter()
                    .enumerate()
                    .find_map(|(i, line)| matcher(line).map(|v| (i, v)))
            }),
        )
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Run this candidate over its window of `lines`.
    pub fn run(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        let head = &lines[..self.window.min(lines.len())];
        (self.scan)(head).map(|(line, value)| ExtractionMatch {
            value,
            rule: self.label,
            line,
        })
    }
}

/// Ordered candidate list with first-match-wins semantics.
#[derive(Default)]
pub struct CandidateChain {
    candidates: Vec<Candidate>,
}

impl CandidateChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate; candidates run in insertion order.
    pub fn then(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn evaluate(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        self.candidates.iter().find_map(|c| c.run(lines))
    }
}

/// Apply a capturing regex to a line and return group 1, trimmed.
pub(crate) fn capture_trimmed(re: &regex::Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// All five header extractors configured from one [`ExtractionConfig`].
pub struct HeaderRules {
    customer: CustomerExtractor,
    invoice: InvoiceNumberExtractor,
    date: DateExtractor,
    rep: RepExtractor,
    zip: ZipExtractor,
}

impl HeaderRules {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            customer: CustomerExtractor::with_config(config),
            invoice: InvoiceNumberExtractor::with_config(config),
            date: DateExtractor::with_config(config),
            rep: RepExtractor::with_config(config),
            zip: ZipExtractor::with_config(config),
        }
    }

    /// Run every extractor over the same line sequence.
    pub fn extract(&self, lines: &[String]) -> HeaderRecord {
        HeaderRecord {
            customer: self.customer.extract(lines).map(|m| m.value),
            rep: self.rep.extract(lines).map(|m| m.value),
            date: self.date.extract(lines).map(|m| m.value),
            invoice: self.invoice.extract(lines).map(|m| m.value),
            zip: self.zip.extract(lines).map(|m| m.value),
        }
    }
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}
