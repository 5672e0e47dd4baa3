//! Integration tests for the processor module
//!
//! Tests the file pipeline using small station files written to temp dirs.

pub mod basic_processing;
pub mod parallel_ordering;

use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "numer nazwa szer_st szer_min szer_sek dl_st dl_min dl_sek stat";

pub const CANONICAL: &str =
    "350 250190120 Warszawa 52 13 56 21 02 25 K 1951 2020 70 12 0 3 5";
pub const SPLIT_NAME: &str =
    "350 249190560 Nowy Targ 49 28 40 20 01 15 K 1951 2020 70 12 0 3 5";
pub const MISSING_SECONDS: &str = "350 Hel 54 36 18 48 1 K 1951 2020 70 12 0 3 5";
pub const UNRECOVERABLE: &str = "12345 Nowy Targ 49 25 20 10 K";

/// Write a station file with the standard header followed by `records`
pub fn write_station_file(dir: &Path, name: &str, records: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(HEADER);
    content.push('\n');
    for record in records {
        content.push_str(record);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}
