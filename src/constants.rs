//! Application constants for the station normalizer
//!
//! Default values for the record layout and for file processing. The record
//! layout defaults feed [`crate::schema::RecordSchema::default`], which is the
//! only place the rest of the crate reads them from.

// =============================================================================
// Record Layout
// =============================================================================

/// Number of tokens in a canonical record
pub const CANONICAL_FIELD_COUNT: usize = 17;

/// Zero-based position the sentinel token must occupy after repair
pub const SENTINEL_INDEX: usize = 9;

/// Records with fewer tokens than this after merging get the seconds-fill pass
pub const SECONDS_FILL_THRESHOLD: usize = 16;

/// Insertion position of the latitude seconds placeholder
pub const LAT_SECONDS_INDEX: usize = 4;

/// Insertion position of the longitude seconds placeholder (after the latitude insert)
pub const LON_SECONDS_INDEX: usize = 7;

/// Token inserted for an omitted arc-seconds field
pub const SECONDS_PLACEHOLDER: &str = "0";

/// Separator used when re-joining a split station name
pub const NAME_MERGE_SEPARATOR: &str = "-";

/// How many times the name-merge pass runs
pub const NAME_MERGE_PASSES: usize = 2;

/// Column names expected by the downstream tabular step, in file order
pub const CANONICAL_COLUMNS: [&str; CANONICAL_FIELD_COUNT] = [
    "short number",
    "location",
    "lat deg",
    "lat min",
    "lat sec",
    "lon deg",
    "lon min",
    "lon sec",
    "station",
    "stat 1",
    "stat 2",
    "stat 3",
    "stat 4",
    "stat 5",
    "stat 6",
    "stat 7",
    "stat 8",
];

// =============================================================================
// File Processing
// =============================================================================

/// Prefix for the default output file name (`correct-<input name>`)
pub const DEFAULT_OUTPUT_PREFIX: &str = "correct-";

/// Lines per chunk when fanning normalization out over workers
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Number of header lines skipped at the top of every source file
pub const HEADER_LINES: usize = 1;

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "station-normalizer";

/// Configuration file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
