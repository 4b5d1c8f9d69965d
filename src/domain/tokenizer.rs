//! Splits a line into word tokens for word-level diffing.

use super::types::Token;
use once_cell::sync::Lazy;
use regex::Regex;

/// A single punctuation character or a run of other non-space characters,
/// followed by whatever whitespace comes next.
static SPLITTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{P}|[^\s\p{P}]*)(\s*)").expect("token pattern is valid"));

/// Tokenize a line. Concatenating the tokens reproduces the line exactly.
pub fn split_words(line: &str) -> Vec<Token<'_>> {
    SPLITTER
        .captures_iter(line)
        .filter_map(|caps| {
            let word = caps.get(1).map_or("", |m| m.as_str());
            let whitespace = caps.get(2).map_or("", |m| m.as_str());
            let token = Token::new(word, whitespace);
            (!token.is_empty()).then_some(token)
        })
        .collect()
}
