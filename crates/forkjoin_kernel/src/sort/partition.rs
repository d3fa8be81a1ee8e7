//! Lomuto partitioning around the last element.

/// Partitions `data[low..=high]` around the pivot `data[high]` and returns
/// the pivot's final index.
///
/// Afterwards every element of `[low, p - 1]` is strictly less than
/// `data[p]` and every element of `[p + 1, high]` is greater than or equal
/// to it. Runs in O(high - low) time with O(1) extra space.
///
/// # Panics
///
/// The caller must guarantee `low < high < data.len()`. Out-of-bounds
/// indices panic on slice indexing.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::partition;
///
/// let mut data = vec![5_i64, 3, 8, 1, 9, 2];
/// let p = partition(&mut data, 0, 5);
///
/// assert_eq!(p, 1);
/// assert_eq!(&data[..2], &[1, 2]);
/// assert!(data[2..].iter().all(|&v| v >= 2));
/// ```
pub fn partition<T: Ord>(data: &mut [T], low: usize, high: usize) -> usize {
    debug_assert!(low < high, "partition requires low < high");
    low + lomuto(&mut data[low..=high])
}

/// Partitions a whole non-empty slice around its last element.
///
/// `boundary` is the first slot not yet known to hold a value below the
/// pivot; the pivot itself stays at the end until the final swap.
#[inline]
pub(crate) fn lomuto<T: Ord>(slice: &mut [T]) -> usize {
    let pivot = slice.len() - 1;
    let mut boundary = 0;
    for j in 0..pivot {
        if slice[j] < slice[pivot] {
            slice.swap(boundary, j);
            boundary += 1;
        }
    }
    slice.swap(boundary, pivot);
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partitioned(data: &[i64], low: usize, high: usize, p: usize) {
        assert!(low <= p && p <= high);
        assert!(data[low..p].iter().all(|v| *v < data[p]));
        assert!(data[p + 1..=high].iter().all(|v| *v >= data[p]));
    }

    #[test]
    fn test_partition_reference_scenario() {
        let mut data = vec![5, 3, 8, 1, 9, 2];
        let p = partition(&mut data, 0, 5);

        assert_eq!(p, 1);
        assert_eq!(data[0], 1);
        assert_eq!(data[1], 2);

        let mut rest = data[2..].to_vec();
        rest.sort_unstable();
        assert_eq!(rest, vec![3, 5, 8, 9]);
    }

    #[test]
    fn test_partition_pivot_is_maximum() {
        let mut data = vec![1, 2, 3, 4, 5];
        let p = partition(&mut data, 0, 4);
        assert_eq!(p, 4);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_partition_pivot_is_minimum() {
        let mut data = vec![5, 4, 3, 2, 1];
        let p = partition(&mut data, 0, 4);
        assert_eq!(p, 0);
        assert_eq!(data[0], 1);
        assert_partitioned(&data, 0, 4, p);
    }

    #[test]
    fn test_partition_all_equal() {
        let mut data = vec![7; 6];
        let p = partition(&mut data, 0, 5);
        // Nothing is strictly less than the pivot.
        assert_eq!(p, 0);
        assert_eq!(data, vec![7; 6]);
    }

    #[test]
    fn test_partition_sub_range_leaves_outside_untouched() {
        let mut data = vec![100, 9, 4, 7, 1, 5, -100];
        let p = partition(&mut data, 1, 5);

        assert_eq!(data[0], 100);
        assert_eq!(data[6], -100);
        assert_eq!(data[p], 5);
        assert_partitioned(&data, 1, 5, p);
    }

    #[test]
    fn test_partition_two_elements() {
        let mut data = vec![2, 1];
        let p = partition(&mut data, 0, 1);
        assert_eq!(p, 0);
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn test_lomuto_single_element() {
        let mut data = vec![42];
        assert_eq!(lomuto(&mut data), 0);
    }
}
