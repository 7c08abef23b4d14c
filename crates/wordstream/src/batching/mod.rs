//! # Batching
//!
//! * [`batchify`] reshapes a flat id sequence into a [`BatchMatrix`].
//! * [`get_window`] and [`WindowIter`] slice a matrix into `(data, target)` [`Window`]s.
pub mod batch_matrix;
pub mod windows;

#[doc(inline)]
pub use batch_matrix::{BatchMatrix, batchify};
#[doc(inline)]
pub use windows::{Window, WindowIter, get_window};
