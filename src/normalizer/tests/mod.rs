//! Tests for the normalizer pipeline
//!
//! Fixtures follow the canonical layout of the default schema: nine
//! descriptive tokens, the sentinel, then the statistics block.


use crate::models::{NormalizationOutcome, RawLine};
use crate::normalizer::Normalizer;
use crate::schema::RecordSchema;

/// Statistics block that follows the sentinel in every fixture
pub const STATS: [&str; 7] = ["1951", "2020", "70", "12", "0", "3", "5"];

/// Build a line from descriptive fields, a sentinel, and the fixture statistics
pub fn record_line(descriptive: &str, sentinel: &str) -> String {
    format!("{descriptive} {sentinel} {}", STATS.join(" "))
}

/// A record already in canonical form
pub fn canonical_line() -> String {
    record_line("350 250190120 Warszawa 52 13 56 21 02 25", "K")
}

pub fn default_normalizer() -> Normalizer {
    Normalizer::new(RecordSchema::default()).unwrap()
}

pub fn normalize(line: &str) -> NormalizationOutcome {
    default_normalizer().normalize_line(&RawLine::new(2, line))
}

pub fn accepted_tokens(outcome: NormalizationOutcome) -> Vec<String> {
    match outcome {
        NormalizationOutcome::Accepted(record) => record.into_tokens(),
        NormalizationOutcome::Rejected(rejection) => {
            panic!("expected acceptance, got {}", rejection.message())
        }
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
