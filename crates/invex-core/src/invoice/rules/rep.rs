//! Sales representative extraction.

use super::patterns::SALES_REP;
use super::{capture_trimmed, Candidate, CandidateChain, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Sales rep extractor.
pub struct RepExtractor {
    chain: CandidateChain,
}

impl RepExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        let chain = CandidateChain::new().then(Candidate::per_line(
            "labeled",
            config.rep_window,
            |line| capture_trimmed(&SALES_REP, line),
        ));
        Self { chain }
    }
}

impl Default for RepExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for RepExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[String]) -> Option<Self::Output> {
        self.chain.evaluate(lines)
    }
}

/// Extract the sales rep from normalized lines.
pub fn extract_rep(lines: &[String]) -> Option<String> {
    RepExtractor::new().extract(lines).map(|m| m.value)
}
