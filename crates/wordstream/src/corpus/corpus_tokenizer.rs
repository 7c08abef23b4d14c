//! # Corpus Tokenizer
//!
//! Converts line-oriented text into flat id sequences.
//!
//! Lines end at `\n`, `\r\n`, or a bare `\r`. Each line is split into
//! words with [`split_words`] and terminated with the end-of-line marker; ids are assigned on first sight through the caller's
//! [`WordVocabBuilder`], so the input is read exactly once.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    corpus::TokenSequence,
    errors::{WSResult, WordstreamError},
    types::TokenType,
    vocab::{WordVocabBuilder, is_word_separator, split_words},
};

/// The default end-of-line marker.
pub const DEFAULT_EOS_TOKEN: &str = "<eos>";

/// Options for [`CorpusTokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusTokenizerOptions {
    /// The synthetic word appended to every line.
    pub eos_token: String,
}

impl Default for CorpusTokenizerOptions {
    fn default() -> Self {
        Self {
            eos_token: DEFAULT_EOS_TOKEN.to_string(),
        }
    }
}

impl CorpusTokenizerOptions {
    /// Sets the end-of-line marker.
    ///
    /// ## Arguments
    /// * `eos_token` - a non-empty word without whitespace.
    pub fn with_eos_token<S: Into<String>>(
        self,
        eos_token: S,
    ) -> Self {
        Self {
            eos_token: eos_token.into(),
        }
    }

    /// Initializes a [`CorpusTokenizer`] from these options.
    ///
    /// ## Returns
    /// `Err(InvalidArgument)` if the marker is empty or contains whitespace.
    pub fn init(self) -> WSResult<CorpusTokenizer> {
        let eos = &self.eos_token;
        if eos.is_empty() || eos.chars().any(is_word_separator) {
            return Err(WordstreamError::InvalidArgument(format!(
                "eos_token {eos:?} must be a non-empty word without whitespace"
            )));
        }
        Ok(CorpusTokenizer { options: self })
    }
}

/// Line-oriented word tokenizer.
#[derive(Debug, Clone, Default)]
pub struct CorpusTokenizer {
    options: CorpusTokenizerOptions,
}

impl CorpusTokenizer {
    /// Get the options.
    pub fn options(&self) -> &CorpusTokenizerOptions {
        &self.options
    }

    /// The end-of-line marker.
    pub fn eos_token(&self) -> &str {
        &self.options.eos_token
    }

    /// Tokenize one line, appending its ids (and the marker id) to `out`.
    pub fn tokenize_line<T: TokenType>(
        &self,
        builder: &mut WordVocabBuilder<T>,
        line: &str,
        out: &mut Vec<T>,
    ) -> WSResult<()> {
        for word in split_words(line).chain(core::iter::once(self.eos_token())) {
            out.push(builder.add_word(word)?);
        }
        Ok(())
    }

    /// Tokenize every line of a [`BufRead`] stream.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, builder, reader)))]
    pub fn tokenize_reader<T, R>(
        &self,
        builder: &mut WordVocabBuilder<T>,
        reader: R,
    ) -> WSResult<TokenSequence<T>>
    where
        T: TokenType,
        R: BufRead,
    {
        let mut tokens = Vec::new();
        for_each_line(reader, |line| self.tokenize_line(builder, line, &mut tokens))?;
        Ok(tokens.into())
    }

    /// Tokenize in-memory text.
    pub fn tokenize_str<T: TokenType>(
        &self,
        builder: &mut WordVocabBuilder<T>,
        text: &str,
    ) -> WSResult<TokenSequence<T>> {
        self.tokenize_reader(builder, text.as_bytes())
    }

    /// Tokenize a text file.
    ///
    /// ## Returns
    /// `Err(ResourceNotFound)` if `path` does not exist; checked before reading.
    pub fn tokenize_path<T, P>(
        &self,
        builder: &mut WordVocabBuilder<T>,
        path: P,
    ) -> WSResult<TokenSequence<T>>
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
        let tokens = self.tokenize_reader(builder, reader)?;

        log::info!(
            "tokenized {}: {} tokens; vocab size {}",
            path.display(),
            tokens.len(),
            builder.size()
        );
        Ok(tokens)
    }
}

/// Call `f` on each line of `reader`.
///
/// `\n`, `\r\n`, and a bare `\r` all end a line. Text after the last
/// terminator is a line only if it is non-empty.
fn for_each_line<R, F>(
    mut reader: R,
    mut f: F,
) -> WSResult<()>
where
    R: BufRead,
    F: FnMut(&str) -> WSResult<()>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let terminated = buf.last() == Some(&b'\n');
        let mut chunk = buf.as_slice();
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        let text = std::str::from_utf8(chunk)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut lines = text.split('\r').peekable();
        while let Some(line) = lines.next() {
            if lines.peek().is_none() && !terminated && line.is_empty() {
                break;
            }
            f(line)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_tokenize_two_lines() {
        let tokenizer = CorpusTokenizer::default();
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();

        let tokens = tokenizer
            .tokenize_reader(&mut builder, "a b\nb a\n".as_bytes())
            .unwrap();

        assert_eq!(tokens.as_slice(), &[0, 1, 2, 1, 0, 2]);

        let vocab = builder.freeze();
        assert_eq!(vocab.lookup_token("a"), Some(0));
        assert_eq!(vocab.lookup_token("b"), Some(1));
        assert_eq!(vocab.lookup_token("<eos>"), Some(2));
    }

    #[test]
    fn test_line_terminators() {
        let tokenizer = CorpusTokenizer::default();

        for text in ["a b\rb a\r", "a b\r\nb a\r\n", "a b\nb a", "a b\rb a\n"] {
            let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
            let tokens = tokenizer.tokenize_str(&mut builder, text).unwrap();
            assert_eq!(tokens.as_slice(), &[0, 1, 2, 1, 0, 2], "{text:?}");
        }

        // "\r\r\n" is a bare CR followed by a CRLF: two lines, one empty.
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
        let tokens = tokenizer
            .tokenize_reader(&mut builder, "x\r\r\ny".as_bytes())
            .unwrap();
        assert_eq!(tokens.as_slice(), &[0, 1, 1, 2, 1]);
    }

    #[test]
    fn test_information_separators_split_words() {
        let tokenizer = CorpusTokenizer::default();
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();

        let tokens = tokenizer.tokenize_str(&mut builder, "a\u{1f}b").unwrap();
        assert_eq!(tokens.as_slice(), &[0, 1, 2]);
        assert_eq!(
            builder.freeze().words().collect::<Vec<_>>(),
            vec!["a", "b", "<eos>"]
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let tokenizer = CorpusTokenizer::default();
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
        assert!(matches!(
            tokenizer.tokenize_reader(&mut builder, &b"ok\n\xff\n"[..]),
            Err(WordstreamError::Io(_))
        ));
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let tokenizer = CorpusTokenizer::default();
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();

        let tokens = tokenizer
            .tokenize_str(&mut builder, "  x\t y  \n\n z")
            .unwrap();

        // x=0 y=1 <eos>=2 z=3
        assert_eq!(tokens.as_slice(), &[0, 1, 2, 2, 3, 2]);
    }

    #[test]
    fn test_shared_builder_across_splits() {
        let tokenizer = CorpusTokenizer::default();
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();

        let train = tokenizer.tokenize_str(&mut builder, "a b").unwrap();
        let valid = tokenizer.tokenize_str(&mut builder, "c a").unwrap();

        assert_eq!(train.as_slice(), &[0, 1, 2]);
        assert_eq!(valid.as_slice(), &[3, 0, 2]);
        assert_eq!(builder.size(), 4);
    }

    #[test]
    fn test_custom_eos() {
        let tokenizer = CorpusTokenizerOptions::default()
            .with_eos_token("</s>")
            .init()
            .unwrap();
        assert_eq!(tokenizer.eos_token(), "</s>");

        let mut builder: WordVocabBuilder<u16> = WordVocabBuilder::new();
        tokenizer.tokenize_str(&mut builder, "hi").unwrap();
        assert_eq!(builder.lookup_token("</s>"), Some(1));

        assert!(
            CorpusTokenizerOptions::default()
                .with_eos_token("end of line")
                .init()
                .is_err()
        );
        assert!(
            CorpusTokenizerOptions::default()
                .with_eos_token("")
                .init()
                .is_err()
        );
    }

    #[test]
    fn test_tokenize_path() {
        let tokenizer = CorpusTokenizer::default();

        tempdir::TempDir::new("tokenize_test")
            .and_then(|dir| {
                let path = dir.path().join("train.txt");
                let mut file = File::create(&path)?;
                write!(file, "the cat\nthe dog\n")?;
                drop(file);

                let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
                let tokens = tokenizer.tokenize_path(&mut builder, &path).unwrap();
                assert_eq!(tokens.as_slice(), &[0, 1, 2, 0, 3, 2]);

                let missing = dir.path().join("valid.txt");
                let before = builder.size();
                assert!(matches!(
                    tokenizer.tokenize_path(&mut builder, &missing),
                    Err(WordstreamError::ResourceNotFound { path }) if path == missing
                ));
                assert_eq!(builder.size(), before);

                Ok(())
            })
            .unwrap();
    }
}
