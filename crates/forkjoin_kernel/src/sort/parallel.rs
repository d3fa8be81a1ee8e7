//! Fork/join parallel quicksort.
//!
//! After one partition the two sides are disjoint sub-slices obtained with
//! `split_at_mut`, so they can be sorted concurrently without locks. The
//! forking call blocks until both sides are done.
//!
//! # Fan-out
//!
//! ```text
//! depth 0            [ ........ range ........ ]
//!                      fork /            \ fork
//! depth 1        [ .. left .. ]     [ .. right .. ]
//!                  fork / \             fork / \
//! depth 2 = max    seq    seq           seq    seq
//! ```
//!
//! Ranges at `depth >= max_depth`, or shorter than `min_chunk`, are sorted
//! sequentially, so at most `2^max_depth - 1` forks happen per call.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread::{self, Scope, ScopedJoinHandle};

use rayon::ThreadPool;
use tracing::{debug, warn};

use super::config::{ForkPolicy, SortBackend, SortConfig};
use super::error::{check_range, SortError};
use super::partition::lomuto;
use super::sequential::quicksort;
use crate::parallel::{build_pool, panic_message};

/// What happened during one parallel sort call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortReport {
    /// Ranges split into two concurrent tasks.
    pub forks: usize,
    /// Ranges handed to the sequential algorithm by the fan-out policy.
    pub sequential_fallbacks: usize,
    /// Thread or pool creation failures recovered by sorting sequentially.
    pub spawn_failures: usize,
}

#[derive(Debug, Default)]
struct ForkCounters {
    forks: AtomicUsize,
    fallbacks: AtomicUsize,
    spawn_failures: AtomicUsize,
}

impl ForkCounters {
    #[inline]
    fn record_fork(&self) {
        self.forks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_spawn_failure(&self) {
        self.spawn_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SortReport {
        SortReport {
            forks: self.forks.load(Ordering::Relaxed),
            sequential_fallbacks: self.fallbacks.load(Ordering::Relaxed),
            spawn_failures: self.spawn_failures.load(Ordering::Relaxed),
        }
    }
}

/// Parallel quicksort driver.
///
/// With the [`SortBackend::WorkStealing`] backend the sorter owns a
/// dedicated Rayon pool, built on the first call whose range is large
/// enough to fork and reused afterwards. If the pool cannot be built every
/// such call sorts sequentially and reports a spawn failure.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::{ParallelSorter, SortConfig};
///
/// let config = SortConfig::builder()
///     .workers(2)
///     .max_depth(2)
///     .min_chunk(16)
///     .build()
///     .unwrap();
/// let sorter = ParallelSorter::new(config);
///
/// let mut data: Vec<i64> = (0..1_000).rev().collect();
/// let report = sorter.sort_all(&mut data).unwrap();
///
/// assert!(data.windows(2).all(|w| w[0] <= w[1]));
/// assert!(report.forks >= 1);
/// ```
pub struct ParallelSorter {
    config: SortConfig,
    pool: OnceLock<Option<ThreadPool>>,
}

impl ParallelSorter {
    /// Creates a sorter for the given configuration.
    pub fn new(config: SortConfig) -> Self {
        Self {
            config,
            pool: OnceLock::new(),
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sorts `data[low..=high]` in place using fork/join parallelism.
    ///
    /// `low >= high` is a no-op returning an empty report.
    ///
    /// # Errors
    ///
    /// - [`SortError::IndexOutOfBounds`] when `high` lies outside `data`.
    /// - [`SortError::WorkerPanicked`] when a sorting task panicked (for
    ///   example a user `Ord` implementation); the range is left in an
    ///   unspecified permutation.
    pub fn sort<T: Ord + Send>(
        &self,
        data: &mut [T],
        low: usize,
        high: usize,
    ) -> Result<SortReport, SortError> {
        if low >= high {
            return Ok(SortReport::default());
        }
        check_range(data.len(), high)?;
        self.sort_all(&mut data[low..=high])
    }

    /// Sorts the whole slice in place using fork/join parallelism.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::WorkerPanicked`] when a sorting task panicked.
    pub fn sort_all<T: Ord + Send>(&self, data: &mut [T]) -> Result<SortReport, SortError> {
        let counters = ForkCounters::default();
        let len = data.len();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(data, &counters)));
        outcome.map_err(|payload| SortError::WorkerPanicked(panic_message(&*payload)))??;

        let report = counters.snapshot();
        debug!(
            len,
            backend = %self.config.backend(),
            forks = report.forks,
            fallbacks = report.sequential_fallbacks,
            spawn_failures = report.spawn_failures,
            "parallel sort finished"
        );
        Ok(report)
    }

    fn dispatch<T: Ord + Send>(
        &self,
        data: &mut [T],
        counters: &ForkCounters,
    ) -> Result<(), SortError> {
        let policy = self.config.policy();
        if data.len() <= 1 {
            return Ok(());
        }
        // A root range that may not fork never touches a thread.
        if !policy.should_fork(data.len(), 0) {
            counters.record_fallback();
            quicksort(data);
            return Ok(());
        }

        match self.config.backend() {
            SortBackend::WorkStealing => match self.pool() {
                Some(pool) => pool.install(|| fork_join(data, 0, policy, counters)),
                None => {
                    counters.record_spawn_failure();
                    counters.record_fallback();
                    quicksort(data);
                }
            },
            SortBackend::ScopedThreads => fork_scoped(data, 0, policy, counters, &OsThreads)?,
        }
        Ok(())
    }

    fn pool(&self) -> Option<&ThreadPool> {
        self.pool
            .get_or_init(|| match build_pool(self.config.workers(), "forkjoin-sort") {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(workers = self.config.workers(), error = %err, "sort pool unavailable, sorting sequentially");
                    None
                }
            })
            .as_ref()
    }
}

impl Default for ParallelSorter {
    fn default() -> Self {
        Self::new(SortConfig::default())
    }
}

/// Process-wide sorter behind [`parallel_sort`].
fn default_sorter() -> &'static ParallelSorter {
    static DEFAULT: OnceLock<ParallelSorter> = OnceLock::new();
    DEFAULT.get_or_init(ParallelSorter::default)
}

/// Sorts `data[low..=high]` in parallel with the default configuration.
///
/// Every call shares one sorter, so repeated calls reuse the same worker
/// pool instead of creating threads of their own.
///
/// # Errors
///
/// See [`ParallelSorter::sort`].
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::parallel_sort;
///
/// let mut data = vec![5_i64, 3, 8, 1, 9, 2];
/// parallel_sort(&mut data, 0, 5).unwrap();
/// assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
/// ```
pub fn parallel_sort<T: Ord + Send>(
    data: &mut [T],
    low: usize,
    high: usize,
) -> Result<SortReport, SortError> {
    default_sorter().sort(data, low, high)
}

fn fork_join<T: Ord + Send>(
    slice: &mut [T],
    depth: usize,
    policy: ForkPolicy,
    counters: &ForkCounters,
) {
    if slice.len() <= 1 {
        return;
    }
    if !policy.should_fork(slice.len(), depth) {
        counters.record_fallback();
        quicksort(slice);
        return;
    }

    counters.record_fork();
    let pivot = lomuto(slice);
    let (left, rest) = slice.split_at_mut(pivot);
    let right = &mut rest[1..];
    rayon::join(
        || fork_join(left, depth + 1, policy, counters),
        || fork_join(right, depth + 1, policy, counters),
    );
}

/// Creates the scoped thread that sorts the right side of a fork.
trait SpawnScoped: Sync {
    fn spawn<'scope, 'env, F, R>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        depth: usize,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, R>>
    where
        F: FnOnce() -> R + Send + 'scope,
        R: Send + 'scope;
}

/// Named OS threads.
struct OsThreads;

impl SpawnScoped for OsThreads {
    fn spawn<'scope, 'env, F, R>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        depth: usize,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, R>>
    where
        F: FnOnce() -> R + Send + 'scope,
        R: Send + 'scope,
    {
        thread::Builder::new()
            .name(format!("forkjoin-sort-d{depth}"))
            .spawn_scoped(scope, task)
    }
}

fn fork_scoped<T: Ord + Send, S: SpawnScoped>(
    slice: &mut [T],
    depth: usize,
    policy: ForkPolicy,
    counters: &ForkCounters,
    spawner: &S,
) -> Result<(), SortError> {
    if slice.len() <= 1 {
        return Ok(());
    }
    if !policy.should_fork(slice.len(), depth) {
        counters.record_fallback();
        quicksort(slice);
        return Ok(());
    }

    let pivot = lomuto(slice);

    // A scope per level: when the spawn fails the right side is sorted
    // after the scope has released its borrow of `slice`.
    let right_done = thread::scope(|scope| -> Result<bool, SortError> {
        let (left, rest) = slice.split_at_mut(pivot);
        let right = &mut rest[1..];

        let spawned = spawner.spawn(scope, depth, move || {
            fork_scoped(right, depth + 1, policy, counters, spawner)
        });

        match spawned {
            Ok(handle) => {
                counters.record_fork();
                let left_result = fork_scoped(left, depth + 1, policy, counters, spawner);
                let right_result = handle
                    .join()
                    .map_err(|payload| SortError::WorkerPanicked(panic_message(&*payload)))?;
                left_result.and(right_result).map(|()| true)
            }
            Err(err) => {
                warn!(depth, error = %err, "failed to spawn sort thread, continuing sequentially");
                counters.record_spawn_failure();
                fork_scoped(left, depth + 1, policy, counters, spawner).map(|()| false)
            }
        }
    })?;

    if !right_done {
        quicksort(&mut slice[pivot + 1..]);
    }
    Ok(())
}
