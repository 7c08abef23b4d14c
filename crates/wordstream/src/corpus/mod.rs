//! # Corpus Tokenization
//!
//! * [`CorpusTokenizer`] - text to flat id sequences.
//! * [`Corpus`] - a tokenized train/valid/test directory and its vocabulary.
#[allow(clippy::module_inception)]
pub mod corpus;
pub mod corpus_tokenizer;
pub mod token_sequence;

#[doc(inline)]
pub use corpus::{Corpus, CorpusOptions, CorpusSplit};
#[doc(inline)]
pub use corpus_tokenizer::{CorpusTokenizer, CorpusTokenizerOptions, DEFAULT_EOS_TOKEN};
#[doc(inline)]
pub use token_sequence::TokenSequence;
