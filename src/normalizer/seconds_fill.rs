//! Seconds-fill pass
//!
//! Some stations record coordinates in whole minutes, so their rows lack both
//! arc-seconds tokens. When a row is short, a placeholder is inserted after
//! the latitude minutes and after the longitude minutes. The check is on
//! width alone: both placeholders go in even if only one field was missing.

use crate::models::TokenSequence;

/// Whether a row of this width gets the seconds placeholders
pub fn needs_fill(token_count: usize, threshold: usize) -> bool {
    token_count < threshold
}

/// Insert the placeholder at `lat_index`, then at `lon_index`.
///
/// `lon_index` counts the latitude insertion. Positions past the end of a
/// short row clamp to its length.
pub fn fill_seconds(
    mut tokens: TokenSequence,
    lat_index: usize,
    lon_index: usize,
    placeholder: &str,
) -> TokenSequence {
    let lat_at = lat_index.min(tokens.len());
    tokens.insert(lat_at, placeholder.to_string());

    let lon_at = lon_index.min(tokens.len());
    tokens.insert(lon_at, placeholder.to_string());

    tokens
}
