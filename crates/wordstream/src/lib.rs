//! # `wordstream` Word-Level Language Model Corpus Pipeline
//!
//! `wordstream` turns line-oriented text corpora into the batched,
//! windowed id streams consumed by next-token language models.
//!
//! See:
//! * [`vocab`] to build and freeze word vocabularies.
//! * [`corpus`] to tokenize text files and train/valid/test directories.
//! * [`batching`] to batchify id sequences and slice them into windows.
//! * [`model`] for the sequence model contract, recurrent state, and quantization.
//! * [`generation`] to sample text from a model.
//! * [`evaluation`] to measure perplexity over windows.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordstream::{
//!     batching::batchify,
//!     corpus::{Corpus, CorpusOptions},
//!     evaluation::{EvaluationOptions, evaluate},
//!     model::{NgramModel, NgramModelOptions},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus: Corpus<u32> = Corpus::load("data/wikitext-2", CorpusOptions::default())?;
//!
//! let model = NgramModel::fit(
//!     corpus.train().as_slice(),
//!     corpus.vocab().len(),
//!     NgramModelOptions::default(),
//! )?;
//!
//! let test_data = batchify(corpus.test().as_slice(), 1)?;
//! let report = evaluate(&model, &test_data, &EvaluationOptions::default())?;
//! println!("test perplexity: {:.2}", report.perplexity);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod corpus;
pub mod errors;
pub mod evaluation;
pub mod generation;
pub mod model;
pub mod types;
pub mod utility;
pub mod vocab;

#[doc(inline)]
pub use errors::{WSResult, WordstreamError};
#[doc(inline)]
pub use types::TokenType;
