//! # Token Sequence

use crate::types::TokenType;

/// The flat id sequence of one tokenized corpus split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence<T: TokenType> {
    tokens: Vec<T>,
}

impl<T: TokenType> From<Vec<T>> for TokenSequence<T> {
    fn from(tokens: Vec<T>) -> Self {
        Self { tokens }
    }
}

impl<T: TokenType> AsRef<[T]> for TokenSequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.tokens
    }
}

impl<T: TokenType> TokenSequence<T> {
    /// View the ids.
    pub fn as_slice(&self) -> &[T] {
        &self.tokens
    }

    /// The number of ids.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the ids.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tokens.iter()
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.tokens
    }
}
