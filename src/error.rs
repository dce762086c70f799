//! Error types for building grapheme tries and reading match state.

use thiserror::Error;

/// The error type for grapheme dictionary, trie and matcher operations.
#[derive(Error, Debug)]
pub enum GraphemeError {
    /// A dictionary entry carries a type tag other than `emoji` or `pictographic`.
    #[error("unrecognized grapheme entry type {0:?}")]
    UnrecognizedType(String),

    /// A dictionary entry has an empty canonical or alternative sequence.
    #[error("empty code point sequence for grapheme {name:?}")]
    EmptySequence {
        /// Name of the offending entry.
        name: String,
    },

    /// A code point in a dictionary entry is not a Unicode scalar value.
    #[error("invalid code point U+{code_point:04X} in grapheme {name:?}")]
    InvalidCodePoint {
        /// Name of the offending entry.
        name: String,
        /// The rejected value.
        code_point: u32,
    },

    /// The same code point sequence was mapped to two different graphemes.
    #[error("sequence {sequence} maps to both {existing:?} and {incoming:?}")]
    AmbiguousSequence {
        /// The sequence, formatted as `U+XXXX` code points.
        sequence: String,
        /// Name of the grapheme already stored for the sequence.
        existing: String,
        /// Name of the grapheme that tried to claim it.
        incoming: String,
    },

    /// A match accessor was called while the matcher holds no match.
    #[error("no current match")]
    NotMatched,

    /// The dictionary document could not be parsed.
    #[error("malformed grapheme data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, GraphemeError>;

/// Formats a code point sequence as space separated `U+XXXX` values.
pub(crate) fn format_sequence(code_points: &[u32]) -> String {
    code_points
        .iter()
        .map(|cp| format!("U+{:04X}", cp))
        .collect::<Vec<_>>()
        .join(" ")
}
