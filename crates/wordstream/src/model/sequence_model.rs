//! # Sequence Model Contract

use crate::{
    errors::WSResult,
    model::{DetachState, Logits, RecurrentState},
    types::TokenType,
};

/// An autoregressive next-token model.
///
/// Inputs are row-major `rows x batch_size` id slices, as produced by
/// [`crate::batching::Window::data`]; the returned [`Logits`] have one
/// row per input position, in the same order.
pub trait SequenceModel<T: TokenType> {
    /// The leaf type of the recurrent state.
    type State: DetachState + Clone;

    /// The width of the output logits.
    fn vocab_size(&self) -> usize;

    /// The zero state for `batch_size` parallel streams.
    fn init_state(
        &self,
        batch_size: usize,
    ) -> RecurrentState<Self::State>;

    /// Run the model over `input`, threading `state`.
    fn forward(
        &self,
        input: &[T],
        batch_size: usize,
        state: RecurrentState<Self::State>,
    ) -> WSResult<(Logits, RecurrentState<Self::State>)>;
}
