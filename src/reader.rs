//! Source file reading and record line extraction.
//!
//! Decodes station metadata files (UTF-8, falling back to ISO-8859-1),
//! skips the header line and hands the remaining lines to the normalizer
//! with their source line numbers.

use crate::constants::HEADER_LINES;
use crate::error::{NormalizerError, Result};
use crate::models::RawLine;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Character encoding a source file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

/// Decoded source file split into header and record lines
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
    pub header: Vec<String>,
    pub lines: Vec<RawLine>,
}

/// Read and split a source file
pub async fn read_source(path: &Path) -> Result<SourceFile> {
    if !path.exists() {
        return Err(NormalizerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path).await?;
    parse_source(path, bytes)
}

/// Split already-read bytes into header and record lines
pub fn parse_source(path: &Path, bytes: Vec<u8>) -> Result<SourceFile> {
    let (text, encoding) = decode(bytes);

    let mut header = Vec::with_capacity(HEADER_LINES);
    let mut lines = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if index < HEADER_LINES {
            header.push(line.to_string());
        } else {
            lines.push(RawLine::new(index + 1, line));
        }
    }

    if lines.is_empty() {
        return Err(NormalizerError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Read {}: {:?}, {} record lines",
        path.display(),
        encoding,
        lines.len()
    );

    Ok(SourceFile {
        path: path.to_path_buf(),
        encoding,
        header,
        lines,
    })
}

/// Decode as UTF-8 when valid, otherwise map each byte to its ISO-8859-1 character
pub fn decode(bytes: Vec<u8>) -> (String, SourceEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, SourceEncoding::Utf8),
        Err(err) => {
            let text = err.into_bytes().into_iter().map(char::from).collect();
            (text, SourceEncoding::Latin1)
        }
    }
}
