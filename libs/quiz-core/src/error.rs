//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using SourceError.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised by a word source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Errors from misusing a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("quiz is finished, no word to answer")]
    Finished,

    #[error("current word was already checked")]
    AlreadyChecked,
}

/// Which side of a translation a phrase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Errors when validating new unit content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("no {side} phrases given")]
    NoPhrases { side: Side },

    #[error("{side} phrase {index} is empty")]
    EmptyPhrase { side: Side, index: usize },
}
