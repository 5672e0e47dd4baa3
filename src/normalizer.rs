//! Station record normalizer
//!
//! Repairs one raw record line into a canonical record or rejects it. The
//! stages run in a fixed order:
//!
//! 1. [`tokenizer`] splits the line on single spaces
//! 2. [`name_merge`] re-joins split station names (bounded number of passes)
//! 3. [`seconds_fill`] inserts placeholders when the row is too short
//! 4. [`validator`] checks the sentinel position
//!
//! Each line is handled independently; the normalizer holds no per-record
//! state, so it can be shared across worker threads.
//!
//! ## Usage
//!
//! ```rust
//! use station_normalizer::models::RawLine;
//! use station_normalizer::normalizer::Normalizer;
//! use station_normalizer::schema::RecordSchema;
//!
//! # fn example() -> station_normalizer::error::Result<()> {
//! let normalizer = Normalizer::new(RecordSchema::default())?;
//! let outcome = normalizer.normalize_line(&RawLine::new(2, "12345 Nowy Targ 49 25 20 10 K"));
//! assert!(!outcome.is_accepted());
//! # Ok(())
//! # }
//! ```

pub mod name_merge;
pub mod seconds_fill;
pub mod sentinel;
pub mod tokenizer;
pub mod validator;

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::models::{NormalizationOutcome, RawLine, Repairs, TokenSequence};
use crate::schema::RecordSchema;
use tracing::trace;

/// Applies the repair passes and validation to raw record lines
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: RecordSchema,
}

impl Normalizer {
    /// Create a normalizer for a validated schema
    pub fn new(schema: RecordSchema) -> Result<Self> {
        schema.validate()?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Run the repair passes without validating the result
    pub fn repair(&self, line: &str) -> (TokenSequence, Repairs) {
        let tokens = tokenizer::tokenize(line);

        let (tokens, merges) = name_merge::merge_names(
            tokens,
            &self.schema.merge_separator,
            self.schema.merge_passes,
        );

        let seconds_filled =
            seconds_fill::needs_fill(tokens.len(), self.schema.seconds_fill_threshold);
        let tokens = if seconds_filled {
            seconds_fill::fill_seconds(
                tokens,
                self.schema.lat_seconds_index,
                self.schema.lon_seconds_index,
                &self.schema.seconds_placeholder,
            )
        } else {
            tokens
        };

        (
            tokens,
            Repairs {
                merges,
                seconds_filled,
            },
        )
    }

    /// Normalize one line
    pub fn normalize_line(&self, raw: &RawLine) -> NormalizationOutcome {
        let (tokens, repairs) = self.repair(&raw.text);
        trace!(
            "Line {} repaired to {} tokens ({} merges, seconds filled: {})",
            raw.line_number,
            tokens.len(),
            repairs.merges,
            repairs.seconds_filled
        );
        validator::validate(raw, tokens, repairs, &self.schema)
    }

    /// Normalize lines in order, one outcome per line
    pub fn normalize_all(&self, lines: &[RawLine]) -> Vec<NormalizationOutcome> {
        lines.iter().map(|raw| self.normalize_line(raw)).collect()
    }
}
