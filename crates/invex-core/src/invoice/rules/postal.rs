//! US ZIP code extraction.

use super::patterns::{has_state_abbreviation, ZIP_CODE};
use super::{Candidate, CandidateChain, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// ZIP code extractor.
///
/// A `City, ST 12345` line is preferred; failing that, the bare ZIP closest
/// to the end of the window wins.
pub struct ZipExtractor {
    chain: CandidateChain,
}

impl ZipExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        let chain = CandidateChain::new()
            .then(Candidate::per_line("with-state", config.zip_window, |line| {
                if !has_state_abbreviation(line) {
                    return None;
                }
                ZIP_CODE.find(line).map(|m| m.as_str().to_string())
            }))
            .then(Candidate::new(
                "bare-reverse",
                config.zip_window,
                Box::new(|lines: &[String]| {
                    lines.iter().enumerate().rev().find_map(|(i, line)| {
                        ZIP_CODE.find(line).map(|m| (i, m.as_str().to_string()))
                    })
                }),
            ));
        Self { chain }
    }
}

impl Default for ZipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ZipExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[String]) -> Option<Self::Output> {
        self.chain.evaluate(lines)
    }
}

/// Extract the ZIP code from normalized lines.
pub fn extract_zip(lines: &[String]) -> Option<String> {
    ZipExtractor::new().extract(lines).map(|m| m.value)
}
