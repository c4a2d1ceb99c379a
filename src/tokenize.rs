//! Input tokenization
//!
//! Splits free text into tokens on runs of whitespace. A token is any maximal
//! run of non-whitespace characters; no case folding or punctuation handling
//! is applied.

/// Token identifier. Compared by exact value.
pub type Token = String;

/// Split input into its ordered sequence of tokens.
///
/// Empty or whitespace-only input yields an empty sequence.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    input.split_whitespace().map(str::to_string).collect()
}
