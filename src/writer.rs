//! Normalized output writing
//!
//! Accepted records are written one per line, tokens joined with single
//! spaces. Output goes to a temporary file next to the destination and is
//! renamed into place once complete, so readers never see a half-written
//! file and an interrupted run leaves the destination untouched.

use crate::error::{NormalizerError, Result};
use crate::models::{CanonicalRecord, Rejection};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What a write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub lines: usize,
    pub bytes: u64,
}

/// Default destination for a normalized file: `<prefix><input name>` beside the input
pub fn default_output_path(input: &Path, prefix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stations.csv".to_string());

    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{prefix}{file_name}"))
}

/// Render records as the normalized file body
pub fn render_records(records: &[CanonicalRecord]) -> String {
    let mut body = String::new();
    for record in records {
        body.push_str(&record.to_line());
        body.push('\n');
    }
    body
}

/// Write accepted records atomically
pub fn write_records(
    path: &Path,
    records: &[CanonicalRecord],
    force_overwrite: bool,
) -> Result<WriteSummary> {
    let bytes = write_atomic(path, force_overwrite, |out| {
        for record in records {
            writeln!(out, "{}", record.to_line())?;
        }
        Ok(())
    })?;

    info!(
        "Wrote {} normalized records to {}",
        records.len(),
        path.display()
    );

    Ok(WriteSummary {
        path: path.to_path_buf(),
        lines: records.len(),
        bytes,
    })
}

/// Write a tab-separated rejection report: line, identifier, reason, raw line
pub fn write_rejection_report(path: &Path, rejections: &[Rejection]) -> Result<WriteSummary> {
    let bytes = write_atomic(path, true, |out| {
        writeln!(out, "line\tidentifier\treason\traw")?;
        for rejection in rejections {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                rejection.raw.line_number,
                rejection.identifier(),
                rejection.reason,
                rejection.raw.text
            )?;
        }
        Ok(())
    })?;

    debug!(
        "Wrote {} rejections to {}",
        rejections.len(),
        path.display()
    );

    Ok(WriteSummary {
        path: path.to_path_buf(),
        lines: rejections.len(),
        bytes,
    })
}

/// Refuse an existing destination unless overwriting is allowed
pub fn check_destination(path: &Path, force_overwrite: bool) -> Result<()> {
    if path.exists() && !force_overwrite {
        return Err(NormalizerError::ProcessingFailed {
            path: path.to_path_buf(),
            reason: "output file already exists (use --force to overwrite)".to_string(),
        });
    }
    Ok(())
}

fn write_atomic<F>(path: &Path, force_overwrite: bool, fill: F) -> Result<u64>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> std::io::Result<()>,
{
    check_destination(path, force_overwrite)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    {
        let mut out = BufWriter::new(&mut temp);
        fill(&mut out)?;
        out.flush()?;
    }

    let bytes = temp.as_file().metadata()?.len();
    temp.persist(path).map_err(|err| err.error)?;

    Ok(bytes)
}
