//! # Error Types

use std::path::PathBuf;

/// Errors from wordstream operations.
#[derive(Debug, thiserror::Error)]
pub enum WordstreamError {
    /// An input resource does not exist.
    #[error("resource not found: {}", path.display())]
    ResourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An argument is out of its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A word is not present in a frozen vocabulary.
    #[error("unknown word: {0:?}")]
    UnknownWord(String),

    /// Token value out of range for the vocabulary.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Model inputs, outputs, or state disagree on shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for wordstream operations.
pub type WSResult<T> = core::result::Result<T, WordstreamError>;

/// Build a [`WordstreamError::InvalidArgument`] error result.
pub(crate) fn invalid_argument<T>(msg: impl Into<String>) -> WSResult<T> {
    Err(WordstreamError::InvalidArgument(msg.into()))
}
