//! # Batchified Matrix
//!
//! A flat id sequence reshaped into `batch_size` parallel streams which
//! advance one timestep at a time in lock-step.

use core::ops::Range;

use crate::{
    batching::{Window, WindowIter, get_window},
    errors::{WSResult, invalid_argument},
    types::TokenType,
};

/// A `rows x batch_size` matrix of ids.
///
/// Element `[t][b]` is the id at position `b * rows + t` of the
/// (truncated) source sequence. Storage is row-major, so any run of
/// consecutive rows is one contiguous slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchMatrix<T: TokenType> {
    data: Vec<T>,
    rows: usize,
    batch_size: usize,
}

/// Reshape a flat sequence into `batch_size` lock-step streams.
///
/// The sequence is truncated to `floor(len / batch_size) * batch_size`
/// ids; the remainder is dropped.
///
/// ## Arguments
/// * `sequence` - the source ids.
/// * `batch_size` - the number of parallel streams; must be >= 1.
///
/// ## Returns
/// `Err(InvalidArgument)` if `batch_size == 0` or `sequence` is empty.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(sequence)))]
pub fn batchify<T: TokenType>(
    sequence: &[T],
    batch_size: usize,
) -> WSResult<BatchMatrix<T>> {
    if batch_size == 0 {
        return invalid_argument("batch_size must be >= 1");
    }
    if sequence.is_empty() {
        return invalid_argument("cannot batchify an empty sequence");
    }

    let rows = sequence.len() / batch_size;
    let dropped = sequence.len() - rows * batch_size;
    if dropped > 0 {
        log::debug!("batchify: dropping {dropped} trailing ids (batch_size={batch_size})");
    }

    let mut data = Vec::with_capacity(rows * batch_size);
    for t in 0..rows {
        data.extend((0..batch_size).map(|b| sequence[b * rows + t]));
    }

    Ok(BatchMatrix {
        data,
        rows,
        batch_size,
    })
}

impl<T: TokenType> BatchMatrix<T> {
    /// The number of timesteps.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of parallel streams.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The total number of ids.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The row-major backing slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get element `[t][b]`.
    pub fn get(
        &self,
        t: usize,
        b: usize,
    ) -> Option<T> {
        if t < self.rows && b < self.batch_size {
            Some(self.data[t * self.batch_size + b])
        } else {
            None
        }
    }

    /// One timestep across all streams.
    ///
    /// ## Panics
    /// If `t >= self.rows()`.
    pub fn row(
        &self,
        t: usize,
    ) -> &[T] {
        self.rows_slice(t..t + 1)
    }

    /// A run of timesteps, flattened row-major.
    ///
    /// ## Panics
    /// If the range extends past `self.rows()`.
    pub fn rows_slice(
        &self,
        rows: Range<usize>,
    ) -> &[T] {
        &self.data[rows.start * self.batch_size..rows.end * self.batch_size]
    }

    /// Iterate one stream over time.
    ///
    /// ## Panics
    /// If `b >= self.batch_size()`.
    pub fn stream(
        &self,
        b: usize,
    ) -> impl Iterator<Item = T> + '_ {
        assert!(b < self.batch_size, "stream {b} out of range");
        self.data
            .iter()
            .skip(b)
            .step_by(self.batch_size)
            .copied()
    }

    /// Flatten back into source order: stream 0, then stream 1, ...
    ///
    /// This reproduces the truncated input of [`batchify`].
    pub fn to_stream_order(&self) -> Vec<T> {
        (0..self.batch_size).flat_map(|b| self.stream(b)).collect()
    }

    /// Get the window starting at row `start`.
    ///
    /// See [`get_window`].
    pub fn window(
        &self,
        start: usize,
        max_window: usize,
    ) -> WSResult<Window<'_, T>> {
        get_window(self, start, max_window)
    }

    /// Iterate over consecutive windows of at most `max_window` rows.
    ///
    /// ## Returns
    /// `Err(InvalidArgument)` if `max_window == 0`.
    pub fn windows(
        &self,
        max_window: usize,
    ) -> WSResult<WindowIter<'_, T>> {
        WindowIter::new(self, max_window)
    }
}
