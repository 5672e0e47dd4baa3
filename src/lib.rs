//! Station Normalizer Library
//!
//! Repairs climate station metadata files whose whitespace-delimited rows are
//! inconsistently tokenized: station names split over several tokens and
//! latitude/longitude rows missing their arc-seconds fields.
//!
//! This library provides tools for:
//! - Tokenizing rows and locating the `K`/`N`/`-` sentinel that ends the
//!   descriptive fields
//! - Re-joining split station names and filling omitted seconds
//! - Validating the repaired layout and reporting unrecoverable rows
//! - Reading UTF-8 or ISO-8859-1 source files and writing normalized output atomically
//! - Loading normalized files into polars under the downstream column names

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod normalizer;
pub mod processor;
pub mod reader;
pub mod schema;
pub mod writer;

// Re-export commonly used types
pub use config::Config;
pub use error::{NormalizerError, Result};
pub use models::{CanonicalRecord, NormalizationOutcome, RawLine, Rejection};
pub use normalizer::Normalizer;
pub use processor::FileProcessor;
pub use schema::RecordSchema;
