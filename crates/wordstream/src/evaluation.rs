//! # Perplexity Evaluation

use crate::{
    batching::BatchMatrix,
    errors::{WSResult, invalid_argument},
    model::SequenceModel,
    types::TokenType,
};

/// The default window length; the truncated backprop-through-time span.
pub const DEFAULT_MAX_WINDOW: usize = 25;

/// Options for [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// The maximum rows per window.
    pub max_window: usize,

    /// Stop after this many windows, if set.
    pub max_windows: Option<usize>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_window: DEFAULT_MAX_WINDOW,
            max_windows: None,
        }
    }
}

impl EvaluationOptions {
    /// Sets the maximum rows per window.
    pub fn with_max_window(
        self,
        max_window: usize,
    ) -> Self {
        Self { max_window, ..self }
    }

    /// Sets the window limit.
    pub fn with_max_windows(
        self,
        max_windows: Option<usize>,
    ) -> Self {
        Self {
            max_windows,
            ..self
        }
    }
}

/// The result of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalReport {
    /// Mean per-position cross-entropy, in nats.
    pub mean_loss: f64,

    /// `exp(mean_loss)`.
    pub perplexity: f64,

    /// The number of windows evaluated.
    pub windows: usize,

    /// The number of matrix rows predicted.
    pub rows: usize,
}

/// Evaluate `model` over every window of `data`.
///
/// The state is threaded across windows and detached after each one.
/// Each window contributes `window.len() * mean_cross_entropy`; the total
/// is divided by the number of predicted rows, which is `data.rows() - 1`
/// when no window limit applies.
///
/// ## Returns
/// `Err(InvalidArgument)` if `data` has fewer than 2 rows.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(model, data)))]
pub fn evaluate<T, M>(
    model: &M,
    data: &BatchMatrix<T>,
    options: &EvaluationOptions,
) -> WSResult<EvalReport>
where
    T: TokenType,
    M: SequenceModel<T>,
{
    if data.rows() < 2 {
        return invalid_argument(format!(
            "evaluation needs at least 2 rows; got {}",
            data.rows()
        ));
    }
    if options.max_windows == Some(0) {
        return invalid_argument("max_windows must be >= 1");
    }
    let windows = data.windows(options.max_window)?;
    let limit = options.max_windows.unwrap_or(usize::MAX);

    let batch_size = data.batch_size();
    let mut state = model.init_state(batch_size);
    let mut total_loss = 0.0;
    let mut rows = 0;
    let mut count = 0;

    for window in windows.take(limit) {
        let (logits, next_state) = model.forward(window.data(), batch_size, state)?;
        state = next_state.detach();

        let loss = logits.mean_cross_entropy(window.target())?;
        total_loss += window.len() as f64 * loss;
        rows += window.len();
        count += 1;

        log::debug!(
            "window {count} @ row {}: {} rows, loss {loss:.4}",
            window.start(),
            window.len()
        );
    }

    let mean_loss = total_loss / rows as f64;
    let report = EvalReport {
        mean_loss,
        perplexity: mean_loss.exp(),
        windows: count,
        rows,
    };
    log::info!(
        "evaluated {} windows / {} rows: loss {:.4}, ppl {:.2}",
        report.windows,
        report.rows,
        report.mean_loss,
        report.perplexity
    );
    Ok(report)
}
