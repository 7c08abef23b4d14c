//! # Window Iteration
//!
//! Windows pair `L` consecutive rows of a [`BatchMatrix`] with the same rows
//! shifted one timestep ahead; the next-token prediction targets.

use crate::{
    batching::BatchMatrix,
    errors::{WSResult, invalid_argument},
    types::TokenType,
};

/// A bounded `(data, target)` slice of a [`BatchMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a, T: TokenType> {
    start: usize,
    len: usize,
    batch_size: usize,
    data: &'a [T],
    target: &'a [T],
}

impl<'a, T: TokenType> Window<'a, T> {
    /// The first matrix row of `data`.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The number of rows in the window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Windows always hold at least one row.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of parallel streams.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Rows `[start, start + len)`, flattened row-major.
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Rows `[start + 1, start + len + 1)`, flattened row-major.
    pub fn target(&self) -> &'a [T] {
        self.target
    }

    /// One row of `data`.
    pub fn data_row(
        &self,
        i: usize,
    ) -> &'a [T] {
        &self.data[i * self.batch_size..(i + 1) * self.batch_size]
    }
}

/// Get the window of at most `max_window` rows starting at row `start`.
///
/// `len = min(max_window, rows - 1 - start)`.
///
/// ## Returns
/// `Err(InvalidArgument)` unless `start < rows - 1` and `max_window >= 1`.
pub fn get_window<T: TokenType>(
    matrix: &BatchMatrix<T>,
    start: usize,
    max_window: usize,
) -> WSResult<Window<'_, T>> {
    if max_window == 0 {
        return invalid_argument("max_window must be >= 1");
    }
    let last = matrix.rows().saturating_sub(1);
    if start >= last {
        return invalid_argument(format!(
            "window start {start} must be < {last} (rows={})",
            matrix.rows()
        ));
    }

    let len = max_window.min(last - start);
    Ok(Window {
        start,
        len,
        batch_size: matrix.batch_size(),
        data: matrix.rows_slice(start..start + len),
        target: matrix.rows_slice(start + 1..start + len + 1),
    })
}

/// Lazy, finite iterator over the windows of a [`BatchMatrix`].
///
/// Starts at row 0 and advances by `max_window` until no valid start
/// remains. Clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct WindowIter<'a, T: TokenType> {
    matrix: &'a BatchMatrix<T>,
    max_window: usize,
    next_start: usize,
}

impl<'a, T: TokenType> WindowIter<'a, T> {
    /// Create a new iterator.
    ///
    /// ## Returns
    /// `Err(InvalidArgument)` if `max_window == 0`.
    pub fn new(
        matrix: &'a BatchMatrix<T>,
        max_window: usize,
    ) -> WSResult<Self> {
        if max_window == 0 {
            return invalid_argument("max_window must be >= 1");
        }
        Ok(Self {
            matrix,
            max_window,
            next_start: 0,
        })
    }

    /// The maximum window length.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    fn remaining(&self) -> usize {
        let last = self.matrix.rows().saturating_sub(1);
        if self.next_start >= last {
            0
        } else {
            (last - self.next_start).div_ceil(self.max_window)
        }
    }
}

impl<'a, T: TokenType> Iterator for WindowIter<'a, T> {
    type Item = Window<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let window = get_window(self.matrix, self.next_start, self.max_window).ok()?;
        self.next_start += self.max_window;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<T: TokenType> ExactSizeIterator for WindowIter<'_, T> {}

impl<T: TokenType> core::iter::FusedIterator for WindowIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{batching::batchify, errors::WordstreamError};

    #[test]
    fn test_short_final_window() {
        let seq: Vec<u32> = (0..5).collect();
        let m = batchify(&seq, 1).unwrap();

        let w = get_window(&m, 3, 25).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(w.data(), &[3]);
        assert_eq!(w.target(), &[4]);
    }

    #[test]
    fn test_window_target_shift() {
        // rows: [0,4] [1,5] [2,6] [3,7]
        let seq: Vec<u32> = (0..8).collect();
        let m = batchify(&seq, 2).unwrap();

        let w = m.window(0, 2).unwrap();
        assert_eq!(w.start(), 0);
        assert_eq!(w.len(), 2);
        assert_eq!(w.batch_size(), 2);
        assert_eq!(w.data(), &[0, 4, 1, 5]);
        assert_eq!(w.target(), &[1, 5, 2, 6]);
        assert_eq!(w.data_row(1), &[1, 5]);
    }

    #[test]
    fn test_window_bounds() {
        let seq: Vec<u32> = (0..5).collect();
        let m = batchify(&seq, 1).unwrap();

        assert!(matches!(
            get_window(&m, 4, 2),
            Err(WordstreamError::InvalidArgument(_))
        ));
        assert!(matches!(
            get_window(&m, 0, 0),
            Err(WordstreamError::InvalidArgument(_))
        ));
        assert!(matches!(
            m.windows(0),
            Err(WordstreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_window_iter() {
        let seq: Vec<u32> = (0..10).collect();
        let m = batchify(&seq, 1).unwrap();

        let iter = m.windows(4).unwrap();
        assert_eq!(iter.len(), 3);

        let windows: Vec<_> = iter.clone().collect();
        let starts: Vec<_> = windows.iter().map(|w| w.start()).collect();
        let lens: Vec<_> = windows.iter().map(|w| w.len()).collect();
        assert_eq!(starts, vec![0, 4, 8]);
        assert_eq!(lens, vec![4, 4, 1]);

        // Restartable.
        assert_eq!(iter.collect::<Vec<_>>(), windows);

        // Every target id except the first row is covered exactly once.
        let targets: Vec<u32> = windows.iter().flat_map(|w| w.target().to_vec()).collect();
        assert_eq!(targets, (1..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_row_has_no_windows() {
        let seq: Vec<u32> = vec![1, 2];
        let m = batchify(&seq, 2).unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.windows(3).unwrap().count(), 0);
    }
}
