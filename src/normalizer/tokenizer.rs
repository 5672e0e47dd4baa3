//! Line tokenization and re-joining
//!
//! Splits on single ASCII spaces only. Consecutive spaces produce empty
//! tokens, which are kept because later passes address tokens by position.

use crate::models::TokenSequence;

/// Split a raw line into tokens on each ASCII space
pub fn tokenize(line: &str) -> TokenSequence {
    line.split(' ').map(str::to_string).collect()
}

/// Join tokens back into a line with single spaces
pub fn join(tokens: &[String]) -> String {
    tokens.join(" ")
}
