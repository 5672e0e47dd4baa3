//! File processing pipeline.
//!
//! Orchestrates one normalization run per source file: read and decode,
//! normalize every record line (fanned out over blocking worker tasks in
//! chunks when configured), restore input order, write accepted records
//! atomically and report the rejected ones.

use crate::config::Config;
use crate::error::{NormalizerError, Result};
use crate::models::{NormalizationOutcome, NormalizedFile, ProcessingStats, RawLine};
use crate::normalizer::Normalizer;
use crate::reader::{self, SourceEncoding};
use crate::writer::{self, WriteSummary};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks";

/// Where the outputs of one file go
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    /// Normalized file; `None` means `<prefix><input name>` beside the input
    pub output: Option<PathBuf>,
    /// Optional tab-separated rejection report
    pub report: Option<PathBuf>,
    /// Normalize and report without writing anything
    pub dry_run: bool,
}

/// Result of processing one source file
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub encoding: SourceEncoding,
    pub normalized: NormalizedFile,
    pub output: Option<WriteSummary>,
    pub report: Option<WriteSummary>,
    pub stats: ProcessingStats,
}

/// Main processor for station metadata files
#[derive(Debug, Clone)]
pub struct FileProcessor {
    config: Config,
    normalizer: Arc<Normalizer>,
    show_progress: bool,
}

impl FileProcessor {
    /// Create a processor from a configuration, validating it first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let normalizer = Arc::new(Normalizer::new(config.schema.clone())?);
        Ok(Self {
            config,
            normalizer,
            show_progress: false,
        })
    }

    /// Show a progress bar while chunks are normalized
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize lines, returning outcomes in input order
    pub async fn normalize_lines(&self, lines: Vec<RawLine>) -> Result<Vec<NormalizationOutcome>> {
        let workers = self.config.processing.workers;
        let chunk_size = self.config.processing.chunk_size;

        if workers <= 1 || lines.len() <= chunk_size {
            debug!("Normalizing {} lines sequentially", lines.len());
            return Ok(self.normalizer.normalize_all(&lines));
        }

        let chunks: Vec<(usize, Vec<RawLine>)> = lines
            .chunks(chunk_size)
            .map(<[RawLine]>::to_vec)
            .enumerate()
            .collect();

        debug!(
            "Normalizing {} lines in {} chunks on {} workers",
            lines.len(),
            chunks.len(),
            workers
        );

        let progress = self.progress_bar(chunks.len() as u64);

        let results: Vec<_> = stream::iter(chunks)
            .map(|(index, chunk)| {
                let normalizer = Arc::clone(&self.normalizer);
                let progress = progress.clone();
                async move {
                    let outcomes =
                        task::spawn_blocking(move || normalizer.normalize_all(&chunk)).await;
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    (index, outcomes)
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        let mut ordered = Vec::with_capacity(results.len());
        for (index, outcomes) in results {
            let outcomes = outcomes.map_err(|e| NormalizerError::ProcessingFailed {
                path: PathBuf::new(),
                reason: format!("Normalization worker for chunk {} failed: {}", index, e),
            })?;
            ordered.push((index, outcomes));
        }
        ordered.sort_by_key(|(index, _)| *index);

        Ok(ordered.into_iter().flat_map(|(_, chunk)| chunk).collect())
    }

    /// Normalize one source file and write its outputs
    pub async fn process_file(&self, input: &Path, targets: &OutputTargets) -> Result<FileReport> {
        let start_time = Instant::now();

        let source = reader::read_source(input).await?;
        let encoding = source.encoding;
        if encoding == SourceEncoding::Latin1 {
            info!(
                "{} is not valid UTF-8, decoded as ISO-8859-1",
                input.display()
            );
        }

        let outcomes = self
            .normalize_lines(source.lines)
            .await
            .map_err(|e| match e {
                NormalizerError::ProcessingFailed { reason, .. } => {
                    NormalizerError::ProcessingFailed {
                        path: input.to_path_buf(),
                        reason,
                    }
                }
                other => other,
            })?;

        let normalized = NormalizedFile::from_outcomes(outcomes);
        for rejection in &normalized.rejections {
            warn!("{}: {}", input.display(), rejection.message());
        }

        let mut output = None;
        let mut report = None;

        if targets.dry_run {
            debug!("Dry run, nothing written for {}", input.display());
        } else {
            let output_path = targets.output.clone().unwrap_or_else(|| {
                writer::default_output_path(input, &self.config.processing.output_prefix)
            });
            let force_overwrite = self.config.processing.force_overwrite;
            writer::check_destination(&output_path, force_overwrite)?;

            if let Some(path) = &targets.report {
                report = Some(writer::write_rejection_report(path, &normalized.rejections)?);
            }

            output = Some(writer::write_records(
                &output_path,
                &normalized.records,
                force_overwrite,
            )?);
        }

        let mut stats = ProcessingStats::default();
        stats.record_file(&normalized);
        stats.processing_time_ms = start_time.elapsed().as_millis();
        if let Some(summary) = &output {
            stats.output_paths.push(summary.path.clone());
        }

        info!(
            "Normalized {}: {} accepted, {} rejected",
            input.display(),
            stats.records_accepted,
            stats.records_rejected
        );

        Ok(FileReport {
            input: input.to_path_buf(),
            encoding,
            normalized,
            output,
            report,
            stats,
        })
    }

    /// Process several files, skipping failed ones unless the failure is critical
    pub async fn process_files(
        &self,
        inputs: &[PathBuf],
        targets: &OutputTargets,
    ) -> Result<(Vec<FileReport>, ProcessingStats)> {
        if inputs.len() > 1 && (targets.output.is_some() || targets.report.is_some()) {
            return Err(NormalizerError::configuration(
                "Explicit output and report paths can only be used with a single input file",
            ));
        }

        let mut reports = Vec::with_capacity(inputs.len());
        let mut stats = ProcessingStats::default();

        for input in inputs {
            match self.process_file(input, targets).await {
                Ok(report) => {
                    stats.absorb(report.stats.clone());
                    reports.push(report);
                }
                Err(e) if e.is_critical() => return Err(e),
                Err(e) => {
                    error!("Failed to process {}: {}", input.display(), e);
                    stats.files_failed += 1;
                }
            }
        }

        Ok((reports, stats))
    }

    fn progress_bar(&self, len: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

#[cfg(test)]
mod tests;
