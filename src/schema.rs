//! Record schema definition and validation.
//!
//! Every layout constant the normalizer relies on lives in [`RecordSchema`].
//! A format revision is a change to one field here (or in the config file),
//! and [`RecordSchema::validate`] rejects layouts the passes cannot honor.

use crate::constants::{
    CANONICAL_COLUMNS, CANONICAL_FIELD_COUNT, LAT_SECONDS_INDEX, LON_SECONDS_INDEX,
    NAME_MERGE_PASSES, NAME_MERGE_SEPARATOR, SECONDS_FILL_THRESHOLD, SECONDS_PLACEHOLDER,
    SENTINEL_INDEX,
};
use crate::error::{NormalizerError, Result};
use serde::Deserialize;
use tracing::debug;

/// Layout of a canonical station record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    /// Exact token count of an accepted record
    pub field_count: usize,

    /// Position the sentinel token must occupy
    pub sentinel_index: usize,

    /// Token counts below this trigger the seconds-fill pass
    pub seconds_fill_threshold: usize,

    /// Where the latitude seconds placeholder is inserted
    pub lat_seconds_index: usize,

    /// Where the longitude seconds placeholder is inserted, counted after the
    /// latitude insertion
    pub lon_seconds_index: usize,

    /// Placeholder token for omitted seconds
    pub seconds_placeholder: String,

    /// Separator joining the parts of a split name
    pub merge_separator: String,

    /// Number of name-merge passes
    pub merge_passes: usize,

    /// Also reject records whose token count differs from `field_count`
    pub strict_field_count: bool,

    /// Downstream column names, one per field
    pub columns: Vec<String>,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            field_count: CANONICAL_FIELD_COUNT,
            sentinel_index: SENTINEL_INDEX,
            seconds_fill_threshold: SECONDS_FILL_THRESHOLD,
            lat_seconds_index: LAT_SECONDS_INDEX,
            lon_seconds_index: LON_SECONDS_INDEX,
            seconds_placeholder: SECONDS_PLACEHOLDER.to_string(),
            merge_separator: NAME_MERGE_SEPARATOR.to_string(),
            merge_passes: NAME_MERGE_PASSES,
            strict_field_count: false,
            columns: CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RecordSchema {
    /// Check that the layout is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.field_count == 0 {
            return Err(NormalizerError::invalid_schema("field_count must be positive"));
        }

        if self.sentinel_index >= self.field_count {
            return Err(NormalizerError::invalid_schema(format!(
                "sentinel_index {} is outside a {}-field record",
                self.sentinel_index, self.field_count
            )));
        }

        if self.seconds_fill_threshold > self.field_count {
            return Err(NormalizerError::invalid_schema(format!(
                "seconds_fill_threshold {} exceeds field_count {}",
                self.seconds_fill_threshold, self.field_count
            )));
        }

        if self.lat_seconds_index >= self.lon_seconds_index {
            return Err(NormalizerError::invalid_schema(format!(
                "lat_seconds_index {} must precede lon_seconds_index {}",
                self.lat_seconds_index, self.lon_seconds_index
            )));
        }

        if self.lon_seconds_index >= self.sentinel_index {
            return Err(NormalizerError::invalid_schema(format!(
                "lon_seconds_index {} must precede sentinel_index {}",
                self.lon_seconds_index, self.sentinel_index
            )));
        }

        if self.merge_passes == 0 {
            return Err(NormalizerError::invalid_schema("merge_passes must be at least 1"));
        }

        if self.seconds_placeholder.is_empty() || self.seconds_placeholder.contains(' ') {
            return Err(NormalizerError::invalid_schema(
                "seconds_placeholder must be a single non-empty token",
            ));
        }

        if self.merge_separator.contains(' ') {
            return Err(NormalizerError::invalid_schema("merge_separator must not contain spaces"));
        }

        if self.columns.len() != self.field_count {
            return Err(NormalizerError::invalid_schema(format!(
                "{} column names given for {} fields",
                self.columns.len(),
                self.field_count
            )));
        }

        debug!(
            "Record schema valid: {} fields, sentinel at {}",
            self.field_count, self.sentinel_index
        );

        Ok(())
    }

    /// Column names as string slices, in file order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}
