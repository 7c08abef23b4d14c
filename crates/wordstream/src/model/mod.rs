//! # Sequence Models
//!
//! The contract between the batching pipeline and a next-token model:
//! * [`SequenceModel`] - `init_state` / `forward`.
//! * [`RecurrentState`] - nested state with a recursive [`RecurrentState::detach`].
//! * [`Logits`] - per-position scores and cross-entropy.
//! * [`DynamicQuantize`] - post-training int8 weight quantization.
//!
//! [`NgramModel`] is a small count-based implementation of the contract.
pub mod logits;
pub mod ngram_model;
pub mod quantization;
pub mod recurrent_state;
pub mod sequence_model;

#[doc(inline)]
pub use logits::Logits;
#[doc(inline)]
pub use ngram_model::{ContextToken, NgramModel, NgramModelOptions};
#[doc(inline)]
pub use quantization::{DynamicQuantize, LayerKind, QuantPrecision, WeightRow, quantize_dynamic};
#[doc(inline)]
pub use recurrent_state::{DetachState, RecurrentState};
#[doc(inline)]
pub use sequence_model::SequenceModel;
