//! Command-line interface components.

pub mod commands;

use crate::config::CompressionAlgorithm;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "station-normalizer")]
#[command(about = "Repair inconsistently tokenized climate station metadata files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize station files and write the corrected copies
    Normalize(NormalizeArgs),
    /// Normalize without writing and list the records that would be dropped
    Check(CheckArgs),
    /// Load a normalized file under the downstream column names and write Parquet
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Input files or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output file (single input only; default: correct-<input name> beside the input)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write rejected records to this tab-separated file (single input only)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Number of parallel workers (1 = sequential)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Lines per worker chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,

    /// Output format for the run summary
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Input files or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Number of parallel workers (1 = sequential)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Output format for the run summary
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Normalized file produced by `normalize`
    #[arg(value_name = "NORMALIZED")]
    pub input: PathBuf,

    /// Parquet output path (default: input path with a .parquet extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Parquet compression algorithm
    #[arg(long, value_enum)]
    pub compression: Option<CompressionAlgorithm>,
}

/// Summary formats for `normalize` and `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable summary
    Human,
    /// JSON with the statistics and every rejected record
    Json,
}

impl Args {
    /// Log level implied by -v/-q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ExportArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("parquet"))
    }
}

/// Expand glob patterns into input paths.
///
/// A pattern that matches nothing is kept as a literal path so that the
/// missing file is reported by the processor.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        let mut matched = false;
        let entries = glob::glob(pattern).with_context(|| format!("Invalid pattern '{pattern}'"))?;
        for entry in entries {
            let path = entry.with_context(|| format!("Failed to read match for '{pattern}'"))?;
            if path.is_file() {
                inputs.push(path);
                matched = true;
            }
        }
        if !matched {
            inputs.push(PathBuf::from(pattern));
        }
    }

    inputs.sort();
    inputs.dedup();
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_normalize_command() {
        let args = Args::parse_from([
            "station-normalizer",
            "-vv",
            "normalize",
            "stations.csv",
            "-o",
            "out.csv",
            "-j",
            "2",
            "--force",
        ]);

        assert_eq!(args.log_level(), "debug");
        match args.command {
            Some(Commands::Normalize(normalize)) => {
                assert_eq!(normalize.inputs, vec!["stations.csv"]);
                assert_eq!(normalize.output, Some(PathBuf::from("out.csv")));
                assert_eq!(normalize.workers, Some(2));
                assert!(normalize.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_command() {
        let args = Args::parse_from([
            "station-normalizer",
            "export",
            "correct-stations.csv",
            "--compression",
            "none",
        ]);

        match args.command {
            Some(Commands::Export(export)) => {
                assert_eq!(export.compression, Some(CompressionAlgorithm::Uncompressed));
                assert_eq!(
                    export.output_path(),
                    PathBuf::from("correct-stations.parquet")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_json_output() {
        let args = Args::parse_from([
            "station-normalizer",
            "check",
            "a.csv",
            "--output-format",
            "json",
        ]);

        match args.command {
            Some(Commands::Check(check)) => {
                assert_eq!(check.inputs, vec!["a.csv"]);
                assert_eq!(check.output_format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_format_defaults_to_human() {
        let args = Args::parse_from(["station-normalizer", "normalize", "a.csv"]);

        match args.command {
            Some(Commands::Normalize(normalize)) => {
                assert_eq!(normalize.output_format, OutputFormat::Human);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = Args::parse_from(["station-normalizer", "-q", "-vvv", "check", "a.csv"]);
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn test_expand_inputs_globs_and_literals() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.csv"), "x").unwrap();
        fs::write(temp_dir.path().join("a.csv"), "x").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let pattern = temp_dir.path().join("*.csv").to_string_lossy().into_owned();
        let missing = temp_dir.path().join("missing.csv");

        let inputs = expand_inputs(&[pattern, missing.display().to_string()]).unwrap();

        assert_eq!(
            inputs,
            vec![
                temp_dir.path().join("a.csv"),
                temp_dir.path().join("b.csv"),
                missing,
            ]
        );
    }
}
