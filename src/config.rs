//! Configuration management and validation.
//!
//! Provides the record schema, processing parameters and export settings.
//! Values come from defaults, then an optional TOML file, then CLI
//! overrides, and are validated once before any file is touched.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_PREFIX,
};
use crate::error::{NormalizerError, Result};
use crate::schema::RecordSchema;
use polars::prelude::ParquetCompression;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canonical record layout
    pub schema: RecordSchema,

    /// How files are normalized
    pub processing: ProcessingConfig,

    /// Parquet export settings
    pub export: ExportConfig,
}

/// File processing parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Concurrent normalization workers (1 = sequential)
    pub workers: usize,

    /// Lines handed to one worker at a time
    pub chunk_size: usize,

    /// Prefix for default output file names
    pub output_prefix: String,

    /// Overwrite existing output files
    pub force_overwrite: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            force_overwrite: false,
        }
    }
}

/// Parquet export settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Compression algorithm selection
    pub compression: CompressionAlgorithm,

    /// Column statistics in the Parquet footer
    pub enable_statistics: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::Snappy,
            enable_statistics: true,
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    #[value(name = "none")]
    #[serde(rename = "none")]
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl Config {
    /// Default config file location: `<config dir>/station-normalizer/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            NormalizerError::configuration("Could not determine user config directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML config file; missing sections fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NormalizerError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
            .map_err(|e| NormalizerError::configuration(format!("{} ({})", e, path.display())))
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| NormalizerError::configuration(format!("Invalid config: {}", e)))
    }

    /// Load from an explicit file, else the default location if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check schema and processing parameters
    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;

        if self.processing.workers == 0 {
            return Err(NormalizerError::configuration("workers must be at least 1"));
        }

        if self.processing.chunk_size == 0 {
            return Err(NormalizerError::configuration("chunk_size must be at least 1"));
        }

        if self.processing.output_prefix.is_empty() {
            return Err(NormalizerError::configuration(
                "output_prefix must not be empty (it would overwrite the input)",
            ));
        }

        Ok(())
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.processing.workers = workers;
        self
    }

    /// Create configuration with custom chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.processing.chunk_size = chunk_size;
        self
    }

    /// Enable overwriting existing outputs
    pub fn with_force_overwrite(mut self) -> Self {
        self.processing.force_overwrite = true;
        self
    }

    /// Replace the record schema
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the Parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.export.compression = compression;
        self
    }
}
