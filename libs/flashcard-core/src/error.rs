//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while normalizing delimited text into records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty file")]
    EmptyFile,

    #[error("no usable question/answer rows ({rows} rows read)")]
    NoRecords { rows: usize },

    #[error("malformed input at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl From<csv::Error> for ParseError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        Self::Malformed {
            line,
            message: e.to_string(),
        }
    }
}

/// Local validation failures raised before a deck is handed to storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deck title must not be empty")]
    EmptyTitle,

    #[error("deck has no cards to save")]
    EmptyDeck,

    #[error("card {} has an empty question or answer", .index + 1)]
    BlankCard { index: usize },
}
