//! Error handling for station file normalization.
//!
//! File-level failures are errors and abort the run. Per-record problems are
//! not errors: they come back as [`crate::models::NormalizationOutcome::Rejected`]
//! and the run continues.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input file is empty or has no records after the header: {path}")]
    EmptyInput { path: PathBuf },

    #[error("Invalid record schema: {reason}")]
    InvalidSchema { reason: String },

    #[error("Schema mismatch in {path}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl NormalizerError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Whether this error should stop a multi-file run instead of skipping the file
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::InvalidSchema { .. } | Self::Configuration { .. } | Self::Interrupted { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
