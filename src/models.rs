//! Core data structures for station record normalization.
//!
//! Defines raw input lines, token sequences, canonical records, per-record
//! outcomes and processing statistics used throughout the library.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Ordered, index-addressable tokens of one line
pub type TokenSequence = Vec<String>;

/// One record line from a source file, line terminator already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number in the source file (the header is line 1)
    pub line_number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// Leading identifier token, used to label diagnostics
    pub fn identifier(&self) -> &str {
        self.text.split(' ').next().unwrap_or_default()
    }
}

/// Which repairs were applied on the way to a canonical record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repairs {
    /// Number of hyphen joins performed across all merge passes
    pub merges: usize,
    /// Whether seconds placeholders were inserted
    pub seconds_filled: bool,
}

/// A record that passed validation: fixed field count, sentinel in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub line_number: usize,
    tokens: TokenSequence,
    pub repairs: Repairs,
}

impl CanonicalRecord {
    /// Built by the validator once the layout has been checked
    pub(crate) fn new(line_number: usize, tokens: TokenSequence, repairs: Repairs) -> Self {
        Self {
            line_number,
            tokens,
            repairs,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn identifier(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Station name field (multi-word names are hyphen-joined)
    pub fn name(&self) -> &str {
        self.tokens.get(1).map(String::as_str).unwrap_or_default()
    }

    /// Tokens joined with single spaces, no line terminator
    pub fn to_line(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn into_tokens(self) -> TokenSequence {
        self.tokens
    }
}

/// Why a record could not be repaired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// No token matches the sentinel pattern
    SentinelNotFound,
    /// Sentinel present at the wrong position after all repairs
    SentinelMisplaced { expected: usize, found: usize },
    /// Sentinel in place but the record has the wrong number of fields
    FieldCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::SentinelNotFound => write!(f, "no sentinel token found"),
            RejectReason::SentinelMisplaced { expected, found } => {
                write!(f, "sentinel at index {found}, expected {expected}")
            }
            RejectReason::FieldCountMismatch { expected, found } => {
                write!(f, "{found} fields, expected {expected}")
            }
        }
    }
}

/// A dropped record together with what the caller needs to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub raw: RawLine,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn identifier(&self) -> &str {
        self.raw.identifier()
    }

    /// Human-readable message naming the record
    pub fn message(&self) -> String {
        format!(
            "malformed station record '{}' (line {}): {}",
            self.identifier(),
            self.raw.line_number,
            self.reason
        )
    }
}

/// Result of normalizing one raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationOutcome {
    Accepted(CanonicalRecord),
    Rejected(Rejection),
}

impl NormalizationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, NormalizationOutcome::Accepted(_))
    }

    pub fn line_number(&self) -> usize {
        match self {
            NormalizationOutcome::Accepted(record) => record.line_number,
            NormalizationOutcome::Rejected(rejection) => rejection.raw.line_number,
        }
    }
}

/// Outcomes of a whole file split into the two reporting streams, input order kept
#[derive(Debug, Default)]
pub struct NormalizedFile {
    pub records: Vec<CanonicalRecord>,
    pub rejections: Vec<Rejection>,
}

impl NormalizedFile {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = NormalizationOutcome>) -> Self {
        let mut file = Self::default();
        for outcome in outcomes {
            match outcome {
                NormalizationOutcome::Accepted(record) => file.records.push(record),
                NormalizationOutcome::Rejected(rejection) => file.rejections.push(rejection),
            }
        }
        file
    }
}

/// Processing statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub lines_read: usize,
    pub records_accepted: usize,
    pub records_rejected: usize,
    pub names_merged: usize,
    pub seconds_filled: usize,
    pub processing_time_ms: u128,
    pub output_paths: Vec<PathBuf>,
}

impl ProcessingStats {
    /// Fold the counts of one normalized file into these statistics
    pub fn record_file(&mut self, file: &NormalizedFile) {
        self.files_processed += 1;
        self.lines_read += file.records.len() + file.rejections.len();
        self.records_accepted += file.records.len();
        self.records_rejected += file.rejections.len();
        for record in &file.records {
            self.names_merged += usize::from(record.repairs.merges > 0);
            self.seconds_filled += usize::from(record.repairs.seconds_filled);
        }
    }

    /// Merge the statistics of another run into this one
    pub fn absorb(&mut self, other: ProcessingStats) {
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.lines_read += other.lines_read;
        self.records_accepted += other.records_accepted;
        self.records_rejected += other.records_rejected;
        self.names_merged += other.names_merged;
        self.seconds_filled += other.seconds_filled;
        self.processing_time_ms += other.processing_time_ms;
        self.output_paths.extend(other.output_paths);
    }

    /// Share of records accepted, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            (self.records_accepted as f64 / self.lines_read as f64) * 100.0
        }
    }
}
