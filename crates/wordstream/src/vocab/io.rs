//! # Word Vocabulary IO
//!
//! The text format is one word per line, in id order.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{WSResult, WordstreamError},
    types::TokenType,
    vocab::WordVocab,
};

/// Load a [`WordVocab`] from a vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_word_vocab_path<T, P>(path: P) -> WSResult<WordVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(WordstreamError::ResourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);

    read_word_vocab(reader)
}

/// Read a [`WordVocab`] from a [`BufRead`] stream.
///
/// Trailing `\r` is stripped; blank lines are rejected.
pub fn read_word_vocab<T, R>(reader: R) -> WSResult<WordVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let words = reader
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    WordVocab::try_from_words(words)
}

/// Save a [`WordVocab`] to a vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_word_vocab_path<T: TokenType, P: AsRef<Path>>(
    vocab: &WordVocab<T>,
    path: P,
) -> WSResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_word_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save a [`WordVocab`] to a [`Write`] writer.
pub fn write_word_vocab<T, W>(
    vocab: &WordVocab<T>,
    writer: &mut W,
) -> WSResult<()>
where
    T: TokenType,
    W: Write + ?Sized,
{
    for word in vocab.words() {
        writeln!(writer, "{word}")?;
    }
    Ok(())
}
