//! Common utilities and helper functions
//!
//! This module provides shared text and time helpers used across the pipeline.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Split message text into whitespace-delimited tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Distinct tokens of a message
pub fn token_set(text: &str) -> HashSet<&str> {
    tokenize(text).collect()
}

/// Check that a token looks like a word or hashtag
///
/// Accepts at least two word characters with an optional leading `#`, so URLs,
/// mentions, punctuation and single letters are rejected.
pub fn is_real_word(token: &str) -> bool {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();

    let re = WORD_RE.get_or_init(|| Regex::new(r"^#?\w{2,}$").expect("Invalid regex pattern"));

    re.is_match(token)
}

/// Round a timestamp down to the start of its window
pub fn align_to_window(ts: i64, window_size: i64) -> i64 {
    ts - ts.rem_euclid(window_size)
}
