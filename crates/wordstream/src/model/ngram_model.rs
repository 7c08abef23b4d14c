//! # Interpolated N-gram Model
//!
//! A count-based [`SequenceModel`] fitted from a training sequence.
//!
//! The next-token distribution interpolates trigram, bigram, and smoothed
//! unigram estimates:
//!
//! ```text
//! p(w | a, b) = wt * p3(w | a, b) + wb * p2(w | b) + wu * p1(w)
//! ```
//!
//! Missing trigram contexts back off to the bigram, and missing bigram
//! contexts to the unigram. The recurrent state holds the previous id of
//! each stream; one [`ContextToken`] leaf per stream.
//!
//! All weight rows hold natural log-probabilities.

use crate::{
    errors::{WSResult, WordstreamError, invalid_argument},
    model::{
        DetachState, DynamicQuantize, LayerKind, Logits, QuantPrecision, RecurrentState,
        SequenceModel, WeightRow,
    },
    types::{TokenType, WSHashMap, hash_map_new, token_to_index},
};

/// Options for [`NgramModel::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NgramModelOptions {
    /// Additive smoothing for the unigram estimate; must be > 0.
    pub unigram_alpha: f32,

    /// Interpolation weight of the bigram estimate.
    pub bigram_weight: f32,

    /// Interpolation weight of the trigram estimate.
    pub trigram_weight: f32,
}

impl Default for NgramModelOptions {
    fn default() -> Self {
        Self {
            unigram_alpha: 0.1,
            bigram_weight: 0.4,
            trigram_weight: 0.4,
        }
    }
}

impl NgramModelOptions {
    /// Sets the unigram smoothing.
    pub fn with_unigram_alpha(
        self,
        unigram_alpha: f32,
    ) -> Self {
        Self {
            unigram_alpha,
            ..self
        }
    }

    /// Sets the bigram and trigram interpolation weights.
    ///
    /// The unigram receives the remaining `1 - bigram - trigram`.
    pub fn with_weights(
        self,
        bigram_weight: f32,
        trigram_weight: f32,
    ) -> Self {
        Self {
            bigram_weight,
            trigram_weight,
            ..self
        }
    }

    /// The unigram interpolation weight.
    pub fn unigram_weight(&self) -> f32 {
        1.0 - self.bigram_weight - self.trigram_weight
    }

    fn validate(&self) -> WSResult<()> {
        if self.unigram_alpha.is_nan() || self.unigram_alpha <= 0.0 {
            return invalid_argument("unigram_alpha must be > 0");
        }
        if !(self.bigram_weight >= 0.0 && self.trigram_weight >= 0.0) {
            return invalid_argument("interpolation weights must be >= 0");
        }
        if self.unigram_weight().is_nan() || self.unigram_weight() <= 0.0 {
            return invalid_argument("bigram_weight + trigram_weight must be < 1");
        }
        Ok(())
    }
}

/// The per-stream recurrent context: the previous input id, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextToken<T: TokenType>(pub Option<T>);

impl<T: TokenType> DetachState for ContextToken<T> {
    fn detach(&self) -> Self {
        *self
    }
}

/// Observed continuations of one context, with their log-probabilities.
#[derive(Debug, Clone, PartialEq)]
struct SparseRow<T: TokenType> {
    tokens: Vec<T>,
    weights: WeightRow,
}

impl<T: TokenType> SparseRow<T> {
    fn from_counts(counts: WSHashMap<T, u32>) -> Self {
        let mut entries: Vec<(T, u32)> = counts.into_iter().collect();
        entries.sort_unstable();

        let total: f64 = entries.iter().map(|&(_, c)| c as f64).sum();
        let tokens = entries.iter().map(|&(t, _)| t).collect();
        let weights = entries
            .iter()
            .map(|&(_, c)| (c as f64 / total).ln() as f32)
            .collect();

        Self {
            tokens,
            weights: WeightRow::F32(weights),
        }
    }

    fn quantize(
        &self,
        precision: QuantPrecision,
    ) -> WSResult<Self> {
        Ok(Self {
            tokens: self.tokens.clone(),
            weights: self.weights.quantize(precision)?,
        })
    }

    /// Add `weight * p(token)` for every observed token into `probs`.
    fn accumulate(
        &self,
        weight: f32,
        probs: &mut [f32],
    ) -> WSResult<()> {
        for (i, &token) in self.tokens.iter().enumerate() {
            probs[token_to_index(token)?] += weight * self.weights.get(i).exp();
        }
        Ok(())
    }
}

/// Interpolated trigram/bigram/unigram model.
#[derive(Debug, Clone, PartialEq)]
pub struct NgramModel<T: TokenType> {
    options: NgramModelOptions,
    vocab_size: usize,

    /// Smoothed unigram log-probabilities; a [`LayerKind::Linear`] layer.
    unigram: WeightRow,

    /// `p(next | current)`; a [`LayerKind::Linear`] layer.
    bigram: WSHashMap<T, SparseRow<T>>,

    /// `p(next | previous, current)`; the [`LayerKind::Recurrent`] layer.
    trigram: WSHashMap<(T, T), SparseRow<T>>,
}

impl<T: TokenType> NgramModel<T> {
    /// Fit a model from a training sequence.
    ///
    /// ## Arguments
    /// * `train` - the training ids; each must be `< vocab_size`.
    /// * `vocab_size` - the output width.
    /// * `options` - smoothing and interpolation options.
    pub fn fit(
        train: &[T],
        vocab_size: usize,
        options: NgramModelOptions,
    ) -> WSResult<Self> {
        options.validate()?;
        if vocab_size == 0 {
            return invalid_argument("vocab_size must be >= 1");
        }

        let mut unigram_counts = vec![0u64; vocab_size];
        for &token in train {
            let idx = token_to_index(token)?;
            if idx >= vocab_size {
                return Err(WordstreamError::TokenOutOfRange);
            }
            unigram_counts[idx] += 1;
        }

        let mut bigram_counts: WSHashMap<T, WSHashMap<T, u32>> = hash_map_new();
        for pair in train.windows(2) {
            *bigram_counts
                .entry(pair[0])
                .or_insert_with(hash_map_new)
                .entry(pair[1])
                .or_default() += 1;
        }

        let mut trigram_counts: WSHashMap<(T, T), WSHashMap<T, u32>> = hash_map_new();
        for triple in train.windows(3) {
            *trigram_counts
                .entry((triple[0], triple[1]))
                .or_insert_with(hash_map_new)
                .entry(triple[2])
                .or_default() += 1;
        }

        let alpha = options.unigram_alpha as f64;
        let denom = train.len() as f64 + alpha * vocab_size as f64;
        let unigram = WeightRow::F32(
            unigram_counts
                .iter()
                .map(|&c| ((c as f64 + alpha) / denom).ln() as f32)
                .collect(),
        );

        let bigram = bigram_counts
            .into_iter()
            .map(|(ctx, counts)| (ctx, SparseRow::from_counts(counts)))
            .collect();
        let trigram = trigram_counts
            .into_iter()
            .map(|(ctx, counts)| (ctx, SparseRow::from_counts(counts)))
            .collect();

        log::info!(
            "fitted n-gram model: {} tokens, vocab {vocab_size}",
            train.len()
        );

        Ok(Self {
            options,
            vocab_size,
            unigram,
            bigram,
            trigram,
        })
    }

    /// Get the options.
    pub fn options(&self) -> &NgramModelOptions {
        &self.options
    }

    /// The number of distinct bigram contexts.
    pub fn bigram_contexts(&self) -> usize {
        self.bigram.len()
    }

    /// The number of distinct trigram contexts.
    pub fn trigram_contexts(&self) -> usize {
        self.trigram.len()
    }

    /// Returns true if any layer holds quantized weights.
    pub fn is_quantized(&self) -> bool {
        self.unigram.is_quantized()
            || self.bigram.values().any(|r| r.weights.is_quantized())
            || self.trigram.values().any(|r| r.weights.is_quantized())
    }

    /// Next-token log-probabilities for one position, written into `out`.
    fn predict_into(
        &self,
        previous: Option<T>,
        current: T,
        out: &mut [f32],
    ) -> WSResult<()> {
        let trigram = previous.and_then(|p| self.trigram.get(&(p, current)));
        let bigram = self.bigram.get(&current);

        let mut wu = self.options.unigram_weight();
        let mut wb = self.options.bigram_weight;
        let mut wt = self.options.trigram_weight;
        if trigram.is_none() {
            wb += wt;
            wt = 0.0;
        }
        if bigram.is_none() {
            wu += wb;
            wb = 0.0;
        }

        for (o, w) in out.iter_mut().zip(self.unigram.iter()) {
            *o = wu * w.exp();
        }
        if let Some(row) = bigram {
            row.accumulate(wb, out)?;
        }
        if let Some(row) = trigram {
            row.accumulate(wt, out)?;
        }
        for o in out.iter_mut() {
            *o = o.ln();
        }
        Ok(())
    }

    fn state_leaves(
        &self,
        state: &RecurrentState<ContextToken<T>>,
        batch_size: usize,
    ) -> WSResult<Vec<Option<T>>> {
        let leaves = state.leaves();
        if leaves.len() != batch_size {
            return Err(WordstreamError::ShapeMismatch(format!(
                "state has {} streams, input has {batch_size}",
                leaves.len()
            )));
        }
        Ok(leaves.into_iter().map(|c| c.0).collect())
    }
}

impl<T: TokenType> SequenceModel<T> for NgramModel<T> {
    type State = ContextToken<T>;

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn init_state(
        &self,
        batch_size: usize,
    ) -> RecurrentState<Self::State> {
        RecurrentState::Composite(
            (0..batch_size)
                .map(|_| RecurrentState::Leaf(ContextToken(None)))
                .collect(),
        )
    }

    fn forward(
        &self,
        input: &[T],
        batch_size: usize,
        state: RecurrentState<Self::State>,
    ) -> WSResult<(Logits, RecurrentState<Self::State>)> {
        if batch_size == 0 || input.len() % batch_size != 0 {
            return Err(WordstreamError::ShapeMismatch(format!(
                "input of {} ids is not a multiple of batch_size {batch_size}",
                input.len()
            )));
        }
        let mut previous = self.state_leaves(&state, batch_size)?;

        let mut values = vec![0f32; input.len() * self.vocab_size];
        for (position, (&current, out)) in input
            .iter()
            .zip(values.chunks_exact_mut(self.vocab_size))
            .enumerate()
        {
            if token_to_index(current)? >= self.vocab_size {
                return Err(WordstreamError::TokenOutOfRange);
            }
            let stream = position % batch_size;
            self.predict_into(previous[stream], current, out)?;
            previous[stream] = Some(current);
        }

        let state = RecurrentState::Composite(
            previous
                .into_iter()
                .map(|p| RecurrentState::Leaf(ContextToken(p)))
                .collect(),
        );
        Ok((Logits::new(input.len(), self.vocab_size, values)?, state))
    }
}

impl<T: TokenType> DynamicQuantize for NgramModel<T> {
    fn quantize_dynamic(
        &self,
        targets: &[LayerKind],
        precision: QuantPrecision,
    ) -> WSResult<Self> {
        let mut model = self.clone();

        if targets.contains(&LayerKind::Linear) {
            model.unigram = self.unigram.quantize(precision)?;
            model.bigram = self
                .bigram
                .iter()
                .map(|(&ctx, row)| -> WSResult<_> { Ok((ctx, row.quantize(precision)?)) })
                .collect::<WSResult<_>>()?;
        }
        if targets.contains(&LayerKind::Recurrent) {
            model.trigram = self
                .trigram
                .iter()
                .map(|(&ctx, row)| -> WSResult<_> { Ok((ctx, row.quantize(precision)?)) })
                .collect::<WSResult<_>>()?;
        }
        Ok(model)
    }

    fn weight_bytes(&self) -> usize {
        self.unigram.byte_size()
            + self
                .bigram
                .values()
                .map(|r| r.weights.byte_size())
                .sum::<usize>()
            + self
                .trigram
                .values()
                .map(|r| r.weights.byte_size())
                .sum::<usize>()
    }
}
