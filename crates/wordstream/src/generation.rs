//! # Text Generation
//!
//! Autoregressive sampling from a [`SequenceModel`], one word at a time,
//! feeding each sampled id back as the next input.

use std::io::Write;

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};

use crate::{
    errors::{WSResult, WordstreamError, invalid_argument},
    model::SequenceModel,
    types::{TokenType, token_from_index},
    vocab::WordVocab,
};

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// The number of words to sample.
    pub num_words: usize,

    /// Softmax temperature; higher is more diverse. Must be > 0.
    pub temperature: f32,

    /// Words per output line in [`write_generated`].
    pub words_per_line: usize,

    /// Log progress every `log_interval` words.
    pub log_interval: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_words: 1000,
            temperature: 1.0,
            words_per_line: 20,
            log_interval: 100,
        }
    }
}

impl GenerationOptions {
    /// Sets the number of words.
    pub fn with_num_words(
        self,
        num_words: usize,
    ) -> Self {
        Self { num_words, ..self }
    }

    /// Sets the temperature.
    pub fn with_temperature(
        self,
        temperature: f32,
    ) -> Self {
        Self {
            temperature,
            ..self
        }
    }

    /// Sets the words per output line.
    pub fn with_words_per_line(
        self,
        words_per_line: usize,
    ) -> Self {
        Self {
            words_per_line,
            ..self
        }
    }

    fn validate(&self) -> WSResult<()> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return invalid_argument("temperature must be finite and > 0");
        }
        if self.words_per_line == 0 {
            return invalid_argument("words_per_line must be >= 1");
        }
        Ok(())
    }
}

/// Sample `options.num_words` ids from `model`.
///
/// Starts from a uniformly random id with batch size 1; each step samples
/// from `exp(logit / temperature)`.
pub fn generate<T, M, R>(
    model: &M,
    rng: &mut R,
    options: &GenerationOptions,
) -> WSResult<Vec<T>>
where
    T: TokenType,
    M: SequenceModel<T>,
    R: Rng,
{
    options.validate()?;
    let vocab_size = model.vocab_size();
    if vocab_size == 0 {
        return invalid_argument("cannot sample from an empty vocabulary");
    }

    let num_words = options.num_words;
    let temperature = options.temperature as f64;

    let mut input: T = token_from_index(rng.random_range(0..vocab_size))?;
    let mut state = model.init_state(1);
    let mut weights = vec![0f64; vocab_size];
    let mut generated = Vec::with_capacity(num_words);

    for i in 0..num_words {
        let (logits, next_state) = model.forward(&[input], 1, state)?;
        state = next_state;

        let row = logits.row(0);
        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
        for (w, &l) in weights.iter_mut().zip(row) {
            *w = ((l as f64 - max) / temperature).exp();
        }

        let dist = WeightedIndex::new(&weights)
            .map_err(|e| WordstreamError::InvalidArgument(format!("sampling weights: {e}")))?;
        input = token_from_index(dist.sample(rng))?;
        generated.push(input);

        if options.log_interval > 0 && i % options.log_interval == 0 {
            log::info!("| Generated {i}/{num_words} words");
        }
    }

    Ok(generated)
}

/// Write generated ids as words.
///
/// Words are separated by a space, with a newline after every
/// `words_per_line`th word.
pub fn write_generated<T, W>(
    vocab: &WordVocab<T>,
    tokens: &[T],
    words_per_line: usize,
    writer: &mut W,
) -> WSResult<()>
where
    T: TokenType,
    W: Write + ?Sized,
{
    if words_per_line == 0 {
        return invalid_argument("words_per_line must be >= 1");
    }
    for (i, word) in vocab.decode_tokens(tokens)?.into_iter().enumerate() {
        let sep = if i % words_per_line == words_per_line - 1 {
            '\n'
        } else {
            ' '
        };
        write!(writer, "{word}{sep}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::model::{NgramModel, NgramModelOptions};

    #[test]
    fn test_generate_deterministic_chain() {
        // A strict cycle: every continuation is certain at low temperature.
        let train: Vec<u32> = (0..300).map(|i| i % 5).collect();
        let model = NgramModel::fit(&train, 5, NgramModelOptions::default()).unwrap();

        let options = GenerationOptions::default()
            .with_num_words(12)
            .with_temperature(0.05);

        let mut rng = StdRng::seed_from_u64(7);
        let tokens = generate(&model, &mut rng, &options).unwrap();
        assert_eq!(tokens.len(), 12);
        for pair in tokens.windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % 5);
        }

        // Same seed, same sample.
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(&model, &mut rng, &options).unwrap(), tokens);
    }

    #[test]
    fn test_generate_invalid_temperature() {
        let model = NgramModel::<u32>::fit(&[0, 1], 2, Default::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate(
                &model,
                &mut rng,
                &GenerationOptions::default().with_temperature(0.0)
            ),
            Err(WordstreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_write_generated_line_breaks() {
        let vocab: WordVocab<u32> = WordVocab::try_from_words(["a", "b", "c"]).unwrap();
        let tokens: Vec<u32> = vec![0, 1, 2, 0, 1];

        let mut buf: Vec<u8> = Vec::new();
        write_generated(&vocab, &tokens, 2, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a b\nc a\nb ");

        let mut buf: Vec<u8> = Vec::new();
        assert!(matches!(
            write_generated(&vocab, &[9u32], 20, &mut buf),
            Err(WordstreamError::TokenOutOfRange)
        ));
    }
}
