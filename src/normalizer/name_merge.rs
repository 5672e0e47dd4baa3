//! Name-merge pass
//!
//! Station names sometimes arrive split over several tokens. One pass walks
//! the tokens before the sentinel and hyphen-joins each non-numeric token with
//! a following non-numeric token, skipping past both. Purely numeric tokens
//! are station codes or coordinates and are never merged. Tokens from the
//! sentinel onward are left untouched.
//!
//! A single pass halves a run of split parts, so a bounded number of passes
//! resolves a bounded name length. This is a positional heuristic: it cannot
//! tell a genuine multi-word name from any other pair of adjacent non-numeric
//! tokens.

use super::sentinel;
use crate::models::TokenSequence;
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric pattern is a valid regex"));

/// Whether a token is purely numeric
pub fn is_numeric(token: &str) -> bool {
    NUMERIC_PATTERN.is_match(token)
}

/// Run one merge pass, returning the new tokens and the number of joins made
pub fn merge_pass(tokens: TokenSequence, separator: &str) -> (TokenSequence, usize) {
    let Some(boundary) = sentinel::locate(&tokens) else {
        return (tokens, 0);
    };

    let mut head = tokens;
    let tail = head.split_off(boundary);

    let mut merged = Vec::with_capacity(head.len() + tail.len());
    let mut joins = 0;
    let mut parts = head.into_iter().peekable();

    while let Some(token) = parts.next() {
        if is_numeric(&token) {
            merged.push(token);
            continue;
        }

        match parts.next_if(|next| !is_numeric(next)) {
            Some(next) => {
                merged.push(format!("{token}{separator}{next}"));
                joins += 1;
            }
            None => merged.push(token),
        }
    }

    merged.extend(tail);
    (merged, joins)
}

/// Apply the merge pass a fixed number of times
pub fn merge_names(
    tokens: TokenSequence,
    separator: &str,
    passes: usize,
) -> (TokenSequence, usize) {
    let mut tokens = tokens;
    let mut joins = 0;

    for _ in 0..passes {
        let (next, pass_joins) = merge_pass(tokens, separator);
        tokens = next;
        joins += pass_joins;
    }

    (tokens, joins)
}
