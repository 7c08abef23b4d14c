//! # Vocabulary
//!
//! Word vocabularies assign dense ids to whitespace-delimited words.
//!
//! * [`WordVocabBuilder`] - the insert-only builder threaded through tokenization.
//! * [`WordVocab`] - the frozen, read-only view.
//! * [`io`] - the one-word-per-line text format.
pub mod io;
pub mod word_vocab;

#[doc(inline)]
pub use word_vocab::{WordVocab, WordVocabBuilder, is_word_separator, split_words};
