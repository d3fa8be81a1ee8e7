//! Single-threaded quicksort.

use super::error::{check_range, SortError};
use super::partition::lomuto;

/// Sorts `data[low..=high]` in place on the calling thread.
///
/// `low >= high` is the base case (zero or one element) and returns
/// immediately without inspecting the sequence.
///
/// Worst case O(n²) comparisons on adversarial input for a last-element
/// pivot; stack depth stays O(log n) because only the smaller side recurses.
///
/// # Errors
///
/// Returns [`SortError::IndexOutOfBounds`] when `high` lies outside `data`.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::sort;
///
/// let mut data = vec![5_i64, 3, 8, 1, 9, 2];
/// sort(&mut data, 0, 5).unwrap();
/// assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
///
/// // Only the requested range is touched.
/// let mut data = vec![9_i64, 3, 2, 1, 0];
/// sort(&mut data, 1, 3).unwrap();
/// assert_eq!(data, vec![9, 1, 2, 3, 0]);
/// ```
pub fn sort<T: Ord>(data: &mut [T], low: usize, high: usize) -> Result<(), SortError> {
    if low >= high {
        return Ok(());
    }
    check_range(data.len(), high)?;
    quicksort(&mut data[low..=high]);
    Ok(())
}

/// Sorts the whole slice in place. Empty slices are a no-op.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::sort_all;
///
/// let mut data: Vec<i64> = Vec::new();
/// sort_all(&mut data);
/// assert!(data.is_empty());
/// ```
#[inline]
pub fn sort_all<T: Ord>(data: &mut [T]) {
    quicksort(data);
}

/// Recurses into the smaller partition and loops on the larger one.
pub(crate) fn quicksort<T: Ord>(mut slice: &mut [T]) {
    while slice.len() > 1 {
        let pivot = lomuto(slice);
        let (left, rest) = std::mem::take(&mut slice).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort(left);
            slice = right;
        } else {
            quicksort(right);
            slice = left;
        }
    }
}
