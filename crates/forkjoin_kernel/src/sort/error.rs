//! Error types for the sorting kernels.

use thiserror::Error;

/// Errors reported at the public sort entry points.
///
/// An empty or inverted range (`low >= high`) is not an error: it is the
/// recursion's base case and sorts nothing.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::{sort, SortError};
///
/// let mut data = vec![3_i64, 1, 2];
/// let err = sort(&mut data, 0, 3).unwrap_err();
/// assert_eq!(err, SortError::IndexOutOfBounds { index: 3, len: 3 });
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SortError {
    /// An index of the requested range lies outside the sequence.
    #[error("Index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// A sorting task panicked; carries the panic message.
    #[error("Sort worker panicked: {0}")]
    WorkerPanicked(String),

    /// Fork policy parameters rejected at build time.
    #[error("Invalid fork policy: {0}")]
    InvalidPolicy(String),
}

/// Checks that a non-trivial inclusive range `[low, high]` fits in `len`.
///
/// Only called once `low < high`, so checking `high` covers both ends.
#[inline]
pub(crate) fn check_range(len: usize, high: usize) -> Result<(), SortError> {
    if high >= len {
        return Err(SortError::IndexOutOfBounds { index: high, len });
    }
    Ok(())
}
