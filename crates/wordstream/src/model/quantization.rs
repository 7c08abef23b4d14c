//! # Dynamic Quantization
//!
//! Post-training weight quantization: selected layer kinds have their
//! weight rows replaced by int8 values with a per-row symmetric scale;
//! activations stay `f32` and are computed on the fly.

use crate::errors::{WSResult, WordstreamError};

/// The kinds of layer a model may expose to quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Dense projection layers.
    Linear,

    /// Layers which consume the recurrent state.
    Recurrent,
}

/// Target precision for quantized weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuantPrecision {
    /// Signed 8-bit integers with a per-row `f32` scale.
    #[default]
    QInt8,
}

/// One row of layer weights.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightRow {
    /// Full precision weights.
    F32(Vec<f32>),

    /// `w[i] ~= values[i] as f32 * scale`.
    QInt8 {
        /// The dequantization scale.
        scale: f32,

        /// The quantized values.
        values: Vec<i8>,
    },
}

impl WeightRow {
    /// The number of weights.
    pub fn len(&self) -> usize {
        match self {
            WeightRow::F32(w) => w.len(),
            WeightRow::QInt8 { values, .. } => values.len(),
        }
    }

    /// Returns true if the row holds no weights.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the row is quantized.
    pub fn is_quantized(&self) -> bool {
        matches!(self, WeightRow::QInt8 { .. })
    }

    /// Read one (dequantized) weight.
    ///
    /// ## Panics
    /// If `i >= self.len()`.
    #[inline]
    pub fn get(
        &self,
        i: usize,
    ) -> f32 {
        match self {
            WeightRow::F32(w) => w[i],
            WeightRow::QInt8 { scale, values } => values[i] as f32 * scale,
        }
    }

    /// Iterate over the (dequantized) weights.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }

    /// The storage footprint of the weights, in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            WeightRow::F32(w) => w.len() * size_of::<f32>(),
            WeightRow::QInt8 { values, .. } => values.len() + size_of::<f32>(),
        }
    }

    /// Quantize the row.
    ///
    /// Already quantized rows are returned unchanged.
    ///
    /// ## Returns
    /// `Err(InvalidArgument)` if any weight is not finite.
    pub fn quantize(
        &self,
        precision: QuantPrecision,
    ) -> WSResult<WeightRow> {
        let weights = match self {
            WeightRow::F32(w) => w,
            quantized => return Ok(quantized.clone()),
        };

        match precision {
            QuantPrecision::QInt8 => {
                let mut max_abs = 0f32;
                for &w in weights {
                    if !w.is_finite() {
                        return Err(WordstreamError::InvalidArgument(format!(
                            "cannot quantize non-finite weight {w}"
                        )));
                    }
                    max_abs = max_abs.max(w.abs());
                }

                let scale = if max_abs > 0.0 {
                    max_abs / i8::MAX as f32
                } else {
                    1.0
                };
                let values = weights
                    .iter()
                    .map(|&w| (w / scale).round().clamp(-(i8::MAX as f32), i8::MAX as f32) as i8)
                    .collect();

                Ok(WeightRow::QInt8 { scale, values })
            }
        }
    }
}

/// Models whose weight layers can be dynamically quantized.
pub trait DynamicQuantize: Sized {
    /// Return a copy of the model with every layer of a `targets` kind quantized.
    ///
    /// The quantized model keeps the same `forward` contract.
    fn quantize_dynamic(
        &self,
        targets: &[LayerKind],
        precision: QuantPrecision,
    ) -> WSResult<Self>;

    /// The storage footprint of all weights, in bytes.
    fn weight_bytes(&self) -> usize;
}

/// Quantize `model`, logging the change in weight size.
pub fn quantize_dynamic<M: DynamicQuantize>(
    model: &M,
    targets: &[LayerKind],
    precision: QuantPrecision,
) -> WSResult<M> {
    let quantized = model.quantize_dynamic(targets, precision)?;
    log::info!(
        "quantized {targets:?} to {precision:?}: {} -> {} weight bytes",
        model.weight_bytes(),
        quantized.weight_bytes()
    );
    Ok(quantized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_row() {
        let row = WeightRow::F32(vec![-2.0, -1.0, 0.0, 0.5, 2.54]);
        assert!(!row.is_quantized());
        assert_eq!(row.byte_size(), 20);

        let q = row.quantize(QuantPrecision::QInt8).unwrap();
        assert!(q.is_quantized());
        assert_eq!(q.len(), 5);
        assert_eq!(q.byte_size(), 5 + 4);

        match &q {
            WeightRow::QInt8 { scale, values } => {
                assert!((scale - 0.02).abs() < 1e-6);
                assert_eq!(values[4], 127);
                assert_eq!(values[2], 0);
            }
            WeightRow::F32(_) => panic!("expected quantized row"),
        }

        for (orig, deq) in row.iter().zip(q.iter()) {
            assert!((orig - deq).abs() <= 0.01 + 1e-6, "{orig} vs {deq}");
        }

        // Idempotent.
        assert_eq!(q.quantize(QuantPrecision::QInt8).unwrap(), q);
    }

    #[test]
    fn test_quantize_zero_and_nan() {
        let zeros = WeightRow::F32(vec![0.0; 3]);
        let q = zeros.quantize(QuantPrecision::QInt8).unwrap();
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![0.0; 3]);

        let bad = WeightRow::F32(vec![1.0, f32::NAN]);
        assert!(matches!(
            bad.quantize(QuantPrecision::QInt8),
            Err(WordstreamError::InvalidArgument(_))
        ));
    }
}
