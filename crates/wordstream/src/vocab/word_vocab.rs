//! # Word Vocabulary
//!
//! A [`WordVocabBuilder`] grows while a corpus is tokenized;
//! [`WordVocabBuilder::freeze`] consumes it and returns the read-only [`WordVocab`].

use compact_str::CompactString;

use crate::{
    errors::{WSResult, WordstreamError},
    types::{TokenType, WSHashMap, hash_map_new, token_from_index, token_to_index},
};

/// Returns true if `c` separates words.
///
/// This is Unicode `White_Space` plus the ASCII information separators
/// `U+001C..=U+001F`, matching the separator set of Python's `str.split()`.
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split `line` into its words.
pub fn split_words(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_word_separator).filter(|w| !w.is_empty())
}

/// Insert-only vocabulary builder.
///
/// Ids are dense and assigned in first-seen order, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVocabBuilder<T: TokenType> {
    /// Words in id order.
    words: Vec<CompactString>,

    /// The reverse index.
    index: WSHashMap<CompactString, T>,
}

impl<T: TokenType> Default for WordVocabBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenType> WordVocabBuilder<T> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            index: hash_map_new(),
        }
    }

    /// The number of distinct words added so far.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no words have been added.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add a word to the vocabulary.
    ///
    /// Known words return their existing id without mutation;
    /// new words are assigned the next sequential id.
    ///
    /// ## Arguments
    /// * `word` - the word to add.
    ///
    /// ## Returns
    /// The id of the word; or `Err(VocabSizeOverflow)` if `T` cannot
    /// represent the next id.
    pub fn add_word(
        &mut self,
        word: &str,
    ) -> WSResult<T> {
        if let Some(&token) = self.index.get(word) {
            return Ok(token);
        }

        let token = token_from_index::<T>(self.words.len())?;
        let word = CompactString::from(word);
        self.words.push(word.clone());
        self.index.insert(word, token);
        Ok(token)
    }

    /// Look up the id of a word already in the builder.
    pub fn lookup_token(
        &self,
        word: &str,
    ) -> Option<T> {
        self.index.get(word).copied()
    }

    /// Freeze the builder into a read-only [`WordVocab`].
    pub fn freeze(self) -> WordVocab<T> {
        WordVocab {
            words: self.words,
            index: self.index,
        }
    }
}

/// Read-only bidirectional word/id vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVocab<T: TokenType> {
    /// Words in id order.
    words: Vec<CompactString>,

    /// The reverse index.
    index: WSHashMap<CompactString, T>,
}

impl<T: TokenType> WordVocab<T> {
    /// Build a vocabulary from words listed in id order.
    ///
    /// ## Returns
    /// `Err(VocabConflict)` on duplicate words, or words which are empty
    /// or contain whitespace.
    pub fn try_from_words<I, S>(words: I) -> WSResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = WordVocabBuilder::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() || word.chars().any(is_word_separator) {
                return Err(WordstreamError::VocabConflict(format!(
                    "word {word:?} is empty or contains whitespace"
                )));
            }
            if builder.lookup_token(word).is_some() {
                return Err(WordstreamError::VocabConflict(format!(
                    "duplicate word {word:?}"
                )));
            }
            builder.add_word(word)?;
        }
        Ok(builder.freeze())
    }

    /// The number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return the id for the word, if any.
    pub fn lookup_token(
        &self,
        word: &str,
    ) -> Option<T> {
        self.index.get(word).copied()
    }

    /// Return the word for the id, if any.
    pub fn lookup_word(
        &self,
        token: T,
    ) -> Option<&str> {
        token
            .to_usize()
            .and_then(|idx| self.words.get(idx))
            .map(|w| w.as_str())
    }

    /// Iterate over the words in id order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    /// Encode a sequence of words.
    ///
    /// ## Returns
    /// `Err(UnknownWord)` for the first word not in the vocabulary.
    pub fn encode_words<'a, I>(
        &self,
        words: I,
    ) -> WSResult<Vec<T>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .map(|w| {
                self.lookup_token(w)
                    .ok_or_else(|| WordstreamError::UnknownWord(w.to_string()))
            })
            .collect()
    }

    /// Decode a sequence of ids back to words.
    ///
    /// ## Returns
    /// `Err(TokenOutOfRange)` for the first id not in the vocabulary.
    pub fn decode_tokens(
        &self,
        tokens: &[T],
    ) -> WSResult<Vec<&str>> {
        tokens
            .iter()
            .map(|&t| {
                let idx = token_to_index(t)?;
                self.words
                    .get(idx)
                    .map(|w| w.as_str())
                    .ok_or(WordstreamError::TokenOutOfRange)
            })
            .collect()
    }

    /// Convert back into a builder, to prime further growth.
    pub fn thaw(self) -> WordVocabBuilder<T> {
        WordVocabBuilder {
            words: self.words,
            index: self.index,
        }
    }
}
