//! # Three-Split Corpus

use std::path::{Path, PathBuf};

use crate::{
    corpus::{CorpusTokenizerOptions, TokenSequence},
    errors::WSResult,
    types::TokenType,
    vocab::{WordVocab, WordVocabBuilder},
};

/// The named splits of a [`Corpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorpusSplit {
    /// The training split.
    Train,

    /// The validation split.
    Valid,

    /// The held-out test split.
    Test,
}

impl CorpusSplit {
    /// All splits, in tokenization order.
    pub const ALL: [CorpusSplit; 3] = [CorpusSplit::Train, CorpusSplit::Valid, CorpusSplit::Test];

    /// The split name.
    pub fn name(&self) -> &'static str {
        match self {
            CorpusSplit::Train => "train",
            CorpusSplit::Valid => "valid",
            CorpusSplit::Test => "test",
        }
    }
}

/// Options for [`Corpus::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOptions {
    /// Tokenizer options.
    pub tokenizer: CorpusTokenizerOptions,

    /// The training split file name.
    pub train_file: String,

    /// The validation split file name.
    pub valid_file: String,

    /// The test split file name.
    pub test_file: String,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            tokenizer: CorpusTokenizerOptions::default(),
            train_file: "train.txt".to_string(),
            valid_file: "valid.txt".to_string(),
            test_file: "test.txt".to_string(),
        }
    }
}

impl CorpusOptions {
    /// Sets the tokenizer options.
    pub fn with_tokenizer(
        self,
        tokenizer: CorpusTokenizerOptions,
    ) -> Self {
        Self { tokenizer, ..self }
    }

    /// Sets the file name of a split.
    pub fn with_split_file<S: Into<String>>(
        mut self,
        split: CorpusSplit,
        file: S,
    ) -> Self {
        let file = file.into();
        match split {
            CorpusSplit::Train => self.train_file = file,
            CorpusSplit::Valid => self.valid_file = file,
            CorpusSplit::Test => self.test_file = file,
        }
        self
    }

    /// The file name of a split.
    pub fn split_file(
        &self,
        split: CorpusSplit,
    ) -> &str {
        match split {
            CorpusSplit::Train => &self.train_file,
            CorpusSplit::Valid => &self.valid_file,
            CorpusSplit::Test => &self.test_file,
        }
    }

    /// The path of a split under `dir`.
    pub fn split_path<P: AsRef<Path>>(
        &self,
        dir: P,
        split: CorpusSplit,
    ) -> PathBuf {
        dir.as_ref().join(self.split_file(split))
    }
}

/// A tokenized train/valid/test corpus and its frozen vocabulary.
#[derive(Debug, Clone)]
pub struct Corpus<T: TokenType> {
    vocab: WordVocab<T>,
    train: TokenSequence<T>,
    valid: TokenSequence<T>,
    test: TokenSequence<T>,
}

impl<T: TokenType> Corpus<T> {
    /// Load and tokenize a corpus directory.
    ///
    /// Splits are tokenized train, valid, test; in that order, through one
    /// vocabulary builder, which is then frozen. The order fixes the ids.
    ///
    /// ## Returns
    /// `Err(ResourceNotFound)` for the first missing split file.
    pub fn load<P: AsRef<Path>>(
        dir: P,
        options: CorpusOptions,
    ) -> WSResult<Self> {
        Self::load_with_builder(dir, options, WordVocabBuilder::new())
    }

    /// Load a corpus, starting from a primed builder.
    pub fn load_with_builder<P: AsRef<Path>>(
        dir: P,
        options: CorpusOptions,
        builder: WordVocabBuilder<T>,
    ) -> WSResult<Self> {
        let dir = dir.as_ref();
        let tokenizer = options.tokenizer.clone().init()?;
        let mut builder = builder;

        let train = tokenizer.tokenize_path(
            &mut builder,
            options.split_path(dir, CorpusSplit::Train),
        )?;
        let valid = tokenizer.tokenize_path(
            &mut builder,
            options.split_path(dir, CorpusSplit::Valid),
        )?;
        let test =
            tokenizer.tokenize_path(&mut builder, options.split_path(dir, CorpusSplit::Test))?;

        Ok(Self {
            vocab: builder.freeze(),
            train,
            valid,
            test,
        })
    }

    /// Assemble a corpus from already tokenized parts.
    pub fn from_parts(
        vocab: WordVocab<T>,
        train: TokenSequence<T>,
        valid: TokenSequence<T>,
        test: TokenSequence<T>,
    ) -> Self {
        Self {
            vocab,
            train,
            valid,
            test,
        }
    }

    /// The frozen vocabulary.
    pub fn vocab(&self) -> &WordVocab<T> {
        &self.vocab
    }

    /// The training split.
    pub fn train(&self) -> &TokenSequence<T> {
        &self.train
    }

    /// The validation split.
    pub fn valid(&self) -> &TokenSequence<T> {
        &self.valid
    }

    /// The test split.
    pub fn test(&self) -> &TokenSequence<T> {
        &self.test
    }

    /// Get a split by name.
    pub fn split(
        &self,
        split: CorpusSplit,
    ) -> &TokenSequence<T> {
        match split {
            CorpusSplit::Train => &self.train,
            CorpusSplit::Valid => &self.valid,
            CorpusSplit::Test => &self.test,
        }
    }
}
