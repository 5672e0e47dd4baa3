//! Canonical file loading and Parquet export.
//!
//! Hands a normalized file to polars under the downstream column names.
//! Every column is read as a string so tokens such as `02` keep their exact
//! text; type coercion is left to the consumer.

use crate::config::ExportConfig;
use crate::error::{NormalizerError, Result};
use crate::schema::RecordSchema;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Load a normalized file as a DataFrame with one named column per field
pub fn load_canonical_frame(path: &Path, schema: &RecordSchema) -> Result<DataFrame> {
    if !path.exists() {
        return Err(NormalizerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b' ')
                .with_quote_char(None),
        )
        .into_reader_with_file_handle(file)
        .finish()?;

    if df.width() != schema.field_count {
        return Err(NormalizerError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: schema.field_count,
            found: df.width(),
        });
    }

    df.set_column_names(schema.column_names())?;

    debug!(
        "Loaded {} canonical rows from {}",
        df.height(),
        path.display()
    );

    Ok(df)
}

/// Write a canonical DataFrame to Parquet, returning the file size in bytes
pub fn write_parquet(df: &mut DataFrame, output_path: &Path, config: &ExportConfig) -> Result<u64> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let statistics = if config.enable_statistics {
        StatisticsOptions::default()
    } else {
        StatisticsOptions::empty()
    };

    let file = File::create(output_path)?;
    let size = ParquetWriter::new(file)
        .with_compression(config.compression.to_polars_compression())
        .with_statistics(statistics)
        .finish(df)
        .map_err(|e| NormalizerError::ProcessingFailed {
            path: output_path.to_path_buf(),
            reason: format!("Failed to write parquet: {}", e),
        })?;

    info!(
        "Exported {} rows to {} ({} bytes)",
        df.height(),
        output_path.display(),
        size
    );

    Ok(size)
}

/// Load a normalized file and export it to Parquet in one step
pub fn export_canonical(
    input: &Path,
    output: &Path,
    schema: &RecordSchema,
    config: &ExportConfig,
) -> Result<(usize, u64)> {
    let mut df = load_canonical_frame(input, schema)?;
    let size = write_parquet(&mut df, output, config)?;
    Ok((df.height(), size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ROW: &str = "350 250190120 Warszawa 52 13 56 21 02 25 K 1951 2020 70 12 0 3 5";

    #[test]
    fn test_load_names_columns_and_keeps_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("correct.csv");
        let renamed = ROW.replace("Warszawa", "Nowy-Targ");
        fs::write(&path, format!("{ROW}\n{renamed}\n")).unwrap();

        let df = load_canonical_frame(&path, &RecordSchema::default()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 17);
        assert_eq!(df.get_column_names()[0].as_str(), "short number");
        assert_eq!(df.get_column_names()[16].as_str(), "stat 8");

        let ids = df.column("short number").unwrap().str().unwrap();
        assert_eq!(ids.get(1), Some("350"));

        let lon_sec = df.column("lon sec").unwrap().str().unwrap();
        assert_eq!(lon_sec.get(0), Some("02"));
    }

    #[test]
    fn test_load_wrong_width_is_schema_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short.csv");
        fs::write(&path, "1 Hel 54 K\n").unwrap();

        let err = load_canonical_frame(&path, &RecordSchema::default()).unwrap_err();
        assert!(matches!(
            err,
            NormalizerError::SchemaMismatch {
                expected: 17,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_export_writes_parquet() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("correct.csv");
        let output = temp_dir.path().join("parquet").join("stations.parquet");
        fs::write(&input, format!("{ROW}\n")).unwrap();

        let (rows, size) = export_canonical(
            &input,
            &output,
            &RecordSchema::default(),
            &ExportConfig::default(),
        )
        .unwrap();

        assert_eq!(rows, 1);
        assert!(size > 0);
        assert!(output.exists());
    }
}
