//! Sentinel token classification
//!
//! The sentinel is a run of `K`, `N` and `-` characters separating the
//! descriptive fields of a record from its trailing statistics block.

use regex::Regex;
use std::sync::LazyLock;

static SENTINEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[KN-]+$").expect("sentinel pattern is a valid regex"));

/// Whether a token is a sentinel
pub fn is_sentinel(token: &str) -> bool {
    SENTINEL_PATTERN.is_match(token)
}

/// Index of the first sentinel token, scanning left to right
pub fn locate(tokens: &[String]) -> Option<usize> {
    tokens.iter().position(|token| is_sentinel(token))
}
