//! Command implementations for the station normalizer CLI
//!
//! Sets up logging and configuration, dispatches to the subcommand and
//! prints the summary. Rejected records are surfaced here: one warning per
//! record in the log, a count in the summary, and the first few listed.
//! With `--output-format json` the summary is a JSON document instead.

use crate::cli::{Args, CheckArgs, Commands, ExportArgs, NormalizeArgs, OutputFormat, expand_inputs};
use crate::config::Config;
use crate::export;
use crate::models::{ProcessingStats, RejectReason};
use crate::processor::{FileProcessor, FileReport, OutputTargets};
use crate::reader::SourceEncoding;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Rejections listed per file in the check summary
const MAX_LISTED_REJECTIONS: usize = 20;

/// Main command runner
pub async fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Some(Commands::Normalize(normalize_args)) => run_normalize(config, normalize_args).await,
        Some(Commands::Check(check_args)) => run_check(config, check_args).await,
        Some(Commands::Export(export_args)) => run_export(config, export_args).await,
        None => Ok(ProcessingStats::default()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("station_normalizer={}", log_level)));

    // A subscriber may already be installed (e.g. when run from tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

async fn run_normalize(config: Config, args: NormalizeArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let config = apply_overrides(config, args.workers, args.chunk_size, args.force);
    let inputs = expand_inputs(&args.inputs)?;
    info!("Normalizing {} file(s)", inputs.len());

    let show_progress = args.output_format == OutputFormat::Human;
    let processor = FileProcessor::new(config)?.with_progress(show_progress);
    let targets = OutputTargets {
        output: args.output,
        report: args.report,
        dry_run: false,
    };

    let (reports, mut stats) = processor.process_files(&inputs, &targets).await?;
    stats.processing_time_ms = start_time.elapsed().as_millis();

    print_summary(&reports, &stats, args.output_format, 3)?;

    if stats.files_processed == 0 {
        anyhow::bail!("No input file could be normalized");
    }

    Ok(stats)
}

async fn run_check(config: Config, args: CheckArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let config = apply_overrides(config, args.workers, None, false);
    let inputs = expand_inputs(&args.inputs)?;

    let processor = FileProcessor::new(config)?;
    let targets = OutputTargets {
        dry_run: true,
        ..Default::default()
    };

    let (reports, mut stats) = processor.process_files(&inputs, &targets).await?;
    stats.processing_time_ms = start_time.elapsed().as_millis();

    print_summary(&reports, &stats, args.output_format, MAX_LISTED_REJECTIONS)?;

    Ok(stats)
}

async fn run_export(config: Config, args: ExportArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let mut config = config;
    if let Some(compression) = args.compression {
        config = config.with_compression(compression);
    }
    config.validate()?;

    let input = args.input.clone();
    let output = args.output_path();
    let schema = config.schema.clone();
    let export_config = config.export.clone();

    let (rows, size) = {
        let (input, output) = (input.clone(), output.clone());
        tokio::task::spawn_blocking(move || {
            export::export_canonical(&input, &output, &schema, &export_config)
        })
        .await
        .context("Export task failed")??
    };

    println!(
        "{} {} rows from {} to {} ({})",
        "Exported".bright_green().bold(),
        rows.to_string().bright_white().bold(),
        input.display(),
        output.display().to_string().bright_cyan(),
        format_size(size)
    );

    Ok(ProcessingStats {
        files_processed: 1,
        lines_read: rows,
        records_accepted: rows,
        processing_time_ms: start_time.elapsed().as_millis(),
        output_paths: vec![output],
        ..Default::default()
    })
}

/// Apply CLI argument overrides to configuration
fn apply_overrides(
    mut config: Config,
    workers: Option<usize>,
    chunk_size: Option<usize>,
    force: bool,
) -> Config {
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }
    if let Some(chunk_size) = chunk_size {
        config = config.with_chunk_size(chunk_size);
    }
    if force {
        config = config.with_force_overwrite();
    }
    config
}

/// Print the run summary in the requested format
fn print_summary(
    reports: &[FileReport],
    stats: &ProcessingStats,
    format: OutputFormat,
    max_listed: usize,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for report in reports {
                print_file_summary(report, max_listed);
            }
            print_totals(stats);
        }
        OutputFormat::Json => println!("{}", render_json_summary(reports, stats)?),
    }
    Ok(())
}

fn print_file_summary(report: &FileReport, max_listed: usize) {
    let stats = &report.stats;
    println!(
        "{} {}",
        "File:".bright_cyan(),
        report.input.display().to_string().bright_white().bold()
    );
    println!(
        "  {} accepted, {} rejected ({} merged names, {} filled seconds)",
        stats.records_accepted.to_string().bright_green(),
        stats.records_rejected.to_string().bright_red(),
        stats.names_merged,
        stats.seconds_filled
    );
    if let Some(output) = &report.output {
        println!("  {} {}", "Output:".bright_cyan(), output.path.display());
    }
    if let Some(rejections) = &report.report {
        println!(
            "  {} {}",
            "Rejections:".bright_cyan(),
            rejections.path.display()
        );
    }

    let rejections = &report.normalized.rejections;
    for rejection in rejections.iter().take(max_listed) {
        println!(
            "    {} {}",
            rejection.identifier().yellow(),
            format!("line {}: {}", rejection.raw.line_number, rejection.reason).bright_black()
        );
    }
    let hidden = rejections.len().saturating_sub(max_listed);
    if hidden > 0 {
        println!("    {}", format!("... and {} more", hidden).bright_black());
    }
}

fn print_totals(stats: &ProcessingStats) {
    println!();
    println!(
        "{} {} files, {} lines, {} accepted ({:.1}%), {} rejected, {} failed files in {}ms",
        "Summary:".bright_green().bold(),
        stats.files_processed,
        stats.lines_read,
        stats.records_accepted,
        stats.acceptance_rate(),
        stats.records_rejected,
        stats.files_failed,
        stats.processing_time_ms
    );
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    stats: &'a ProcessingStats,
    files: Vec<JsonFileSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFileSummary<'a> {
    input: &'a Path,
    encoding: SourceEncoding,
    accepted: usize,
    rejected: usize,
    output: Option<&'a Path>,
    rejections: Vec<JsonRejection<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonRejection<'a> {
    line: usize,
    identifier: &'a str,
    reason: &'a RejectReason,
    raw: &'a str,
}

/// Render per-file results and totals as pretty-printed JSON
fn render_json_summary(reports: &[FileReport], stats: &ProcessingStats) -> Result<String> {
    let files = reports
        .iter()
        .map(|report| JsonFileSummary {
            input: &report.input,
            encoding: report.encoding,
            accepted: report.stats.records_accepted,
            rejected: report.stats.records_rejected,
            output: report.output.as_ref().map(|out| out.path.as_path()),
            rejections: report
                .normalized
                .rejections
                .iter()
                .map(|rejection| JsonRejection {
                    line: rejection.raw.line_number,
                    identifier: rejection.identifier(),
                    reason: &rejection.reason,
                    raw: &rejection.raw.text,
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&JsonSummary { stats, files })
        .context("Failed to serialize run summary")
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_apply_overrides() {
        let config = apply_overrides(Config::default(), Some(2), Some(100), true);
        assert_eq!(config.processing.workers, 2);
        assert_eq!(config.processing.chunk_size, 100);
        assert!(config.processing.force_overwrite);

        let untouched = apply_overrides(Config::default(), None, None, false);
        assert_eq!(untouched.processing.chunk_size, 4096);
        assert!(!untouched.processing.force_overwrite);
    }

    #[tokio::test]
    async fn test_run_normalize_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("stations.csv");
        fs::write(
            &input,
            "header\n350 249190560 Nowy Targ 49 28 40 20 01 15 K 1951 2020 70 12 0 3 5\n",
        )
        .unwrap();

        let args = NormalizeArgs {
            inputs: vec![input.to_string_lossy().into_owned()],
            output: None,
            report: None,
            workers: Some(1),
            chunk_size: None,
            force: false,
            output_format: OutputFormat::Human,
        };

        let stats = run_normalize(Config::default(), args).await.unwrap();
        assert_eq!(stats.records_accepted, 1);

        let written = fs::read_to_string(temp_dir.path().join("correct-stations.csv")).unwrap();
        assert_eq!(
            written,
            "350 249190560 Nowy-Targ 49 28 40 20 01 15 K 1951 2020 70 12 0 3 5\n"
        );
    }

    #[tokio::test]
    async fn test_run_normalize_fails_when_nothing_processed() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.csv");
        let args = NormalizeArgs {
            inputs: vec![missing.display().to_string()],
            output: None,
            report: None,
            workers: None,
            chunk_size: None,
            force: false,
            output_format: OutputFormat::Json,
        };

        assert!(run_normalize(Config::default(), args).await.is_err());
    }

    #[tokio::test]
    async fn test_json_summary_lists_rejections() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("stations.csv");
        fs::write(
            &input,
            "header\n\
             350 250190120 Warszawa 52 13 56 21 02 25 K 1951 2020 70 12 0 3 5\n\
             12345 Nowy Targ 49 25 20 10 K\n",
        )
        .unwrap();

        let processor = FileProcessor::new(Config::default().with_workers(1)).unwrap();
        let targets = OutputTargets {
            dry_run: true,
            ..Default::default()
        };
        let (reports, stats) = processor.process_files(&[input], &targets).await.unwrap();

        let json = render_json_summary(&reports, &stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["records_accepted"], 1);
        assert_eq!(value["stats"]["records_rejected"], 1);

        let file = &value["files"][0];
        assert_eq!(file["encoding"], "utf8");
        assert!(file["output"].is_null());

        let rejection = &file["rejections"][0];
        assert_eq!(rejection["line"], 3);
        assert_eq!(rejection["identifier"], "12345");
        assert_eq!(rejection["reason"]["kind"], "sentinel_misplaced");
        assert_eq!(rejection["reason"]["found"], 8);
        assert_eq!(rejection["raw"], "12345 Nowy Targ 49 25 20 10 K");
    }
}
