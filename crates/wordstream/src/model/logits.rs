//! # Logits

use crate::{
    errors::{WSResult, WordstreamError},
    types::{TokenType, token_to_index},
};

/// Dense `positions x vocab_size` scores; one row per input position.
#[derive(Debug, Clone, PartialEq)]
pub struct Logits {
    positions: usize,
    vocab_size: usize,
    values: Vec<f32>,
}

impl Logits {
    /// Wrap row-major scores.
    ///
    /// ## Returns
    /// `Err(ShapeMismatch)` unless `values.len() == positions * vocab_size`.
    pub fn new(
        positions: usize,
        vocab_size: usize,
        values: Vec<f32>,
    ) -> WSResult<Self> {
        if values.len() != positions * vocab_size {
            return Err(WordstreamError::ShapeMismatch(format!(
                "{} logits for {positions} positions x {vocab_size} vocab",
                values.len()
            )));
        }
        Ok(Self {
            positions,
            vocab_size,
            values,
        })
    }

    /// The number of rows.
    pub fn positions(&self) -> usize {
        self.positions
    }

    /// The row width.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// The scores for one position.
    pub fn row(
        &self,
        position: usize,
    ) -> &[f32] {
        &self.values[position * self.vocab_size..(position + 1) * self.vocab_size]
    }

    /// Natural log of the softmax normalizer of a row.
    pub fn log_sum_exp(
        &self,
        position: usize,
    ) -> f64 {
        let row = self.row(position);
        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
        if !max.is_finite() {
            return max;
        }
        let sum: f64 = row.iter().map(|&v| (v as f64 - max).exp()).sum();
        max + sum.ln()
    }

    /// Cross-entropy of `target` at one position, in nats.
    pub fn cross_entropy<T: TokenType>(
        &self,
        position: usize,
        target: T,
    ) -> WSResult<f64> {
        let idx = token_to_index(target)?;
        if idx >= self.vocab_size {
            return Err(WordstreamError::TokenOutOfRange);
        }
        Ok(self.log_sum_exp(position) - self.row(position)[idx] as f64)
    }

    /// Mean cross-entropy over all positions.
    ///
    /// ## Returns
    /// `Err(ShapeMismatch)` unless there is one target per position.
    pub fn mean_cross_entropy<T: TokenType>(
        &self,
        targets: &[T],
    ) -> WSResult<f64> {
        if targets.len() != self.positions {
            return Err(WordstreamError::ShapeMismatch(format!(
                "{} targets for {} positions",
                targets.len(),
                self.positions
            )));
        }
        if targets.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (position, &target) in targets.iter().enumerate() {
            total += self.cross_entropy(position, target)?;
        }
        Ok(total / targets.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_check() {
        assert!(Logits::new(2, 3, vec![0.0; 6]).is_ok());
        assert!(matches!(
            Logits::new(2, 3, vec![0.0; 5]),
            Err(WordstreamError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_uniform_cross_entropy() {
        let logits = Logits::new(2, 4, vec![1.0; 8]).unwrap();
        let ce = logits.mean_cross_entropy(&[0u32, 3]).unwrap();
        assert!((ce - 4f64.ln()).abs() < 1e-9);

        assert!(matches!(
            logits.cross_entropy(0, 4u32),
            Err(WordstreamError::TokenOutOfRange)
        ));
        assert!(matches!(
            logits.mean_cross_entropy(&[0u32]),
            Err(WordstreamError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_peaked_cross_entropy() {
        let logits = Logits::new(1, 3, vec![0.0, 2.0f32.ln(), 0.0]).unwrap();
        // p = [1/4, 2/4, 1/4]
        assert!((logits.cross_entropy(0, 1u32).unwrap() - 2f64.ln()).abs() < 1e-6);
        assert!((logits.cross_entropy(0, 0u32).unwrap() - 4f64.ln()).abs() < 1e-6);
    }
}
