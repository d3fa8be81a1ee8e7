//! Parallel sort configuration: fan-out policy, backend and worker count.

use std::fmt;
use std::str::FromStr;

use super::error::SortError;
use crate::parallel::{available_workers, resolve_workers};

/// Smallest range length that is still worth handing to another thread.
pub const DEFAULT_MIN_CHUNK: usize = 2048;

/// Upper bound on fork depth; a depth of `d` allows up to `2^d - 1` forks.
pub const MAX_FORK_DEPTH: usize = 24;

/// Fan-out policy bounding how many concurrent tasks the parallel sort
/// may create.
///
/// A range forks only while `depth < max_depth` and its length is at least
/// `min_chunk`. Everything else is sorted sequentially on the current
/// thread.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::ForkPolicy;
///
/// let policy = ForkPolicy::new(3, 100).unwrap();
/// assert!(policy.should_fork(1_000, 0));
/// assert!(!policy.should_fork(1_000, 3));
/// assert!(!policy.should_fork(99, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForkPolicy {
    max_depth: usize,
    min_chunk: usize,
}

impl ForkPolicy {
    /// Creates a policy with an explicit depth limit and chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::InvalidPolicy`] if `max_depth` exceeds
    /// [`MAX_FORK_DEPTH`].
    pub fn new(max_depth: usize, min_chunk: usize) -> Result<Self, SortError> {
        if max_depth > MAX_FORK_DEPTH {
            return Err(SortError::InvalidPolicy(format!(
                "max_depth {} exceeds maximum {}",
                max_depth, MAX_FORK_DEPTH
            )));
        }
        Ok(Self {
            max_depth,
            min_chunk: min_chunk.max(2),
        })
    }

    /// Policy sized for `workers` threads: enough depth to give every
    /// worker a task, plus two levels of slack for unbalanced pivots.
    pub fn for_workers(workers: usize) -> Self {
        let levels = workers.max(1).next_power_of_two().trailing_zeros() as usize;
        Self {
            max_depth: (levels + 2).min(MAX_FORK_DEPTH),
            min_chunk: DEFAULT_MIN_CHUNK,
        }
    }

    /// Policy that never forks.
    pub fn sequential() -> Self {
        Self {
            max_depth: 0,
            min_chunk: usize::MAX,
        }
    }

    /// Returns the maximum fork depth.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the minimum range length that may fork.
    #[inline]
    pub fn min_chunk(&self) -> usize {
        self.min_chunk
    }

    /// Whether a range of `len` elements at recursion `depth` may fork.
    #[inline]
    pub fn should_fork(&self, len: usize, depth: usize) -> bool {
        depth < self.max_depth && len >= self.min_chunk
    }
}

impl Default for ForkPolicy {
    fn default() -> Self {
        Self::for_workers(available_workers())
    }
}

/// Execution backend for the parallel sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortBackend {
    /// `rayon::join` on a dedicated work-stealing pool.
    #[default]
    WorkStealing,

    /// One scoped OS thread per fork; the forking thread sorts the left
    /// side itself. Spawn failures fall back to sequential sorting.
    ScopedThreads,
}

impl fmt::Display for SortBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkStealing => write!(f, "work-stealing"),
            Self::ScopedThreads => write!(f, "scoped-threads"),
        }
    }
}

impl FromStr for SortBackend {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work-stealing" | "rayon" => Ok(Self::WorkStealing),
            "scoped-threads" | "threads" => Ok(Self::ScopedThreads),
            other => Err(SortError::InvalidPolicy(format!(
                "unknown backend '{}'. Supported: work-stealing, scoped-threads",
                other
            ))),
        }
    }
}

/// Immutable parallel sort configuration.
///
/// Use [`SortConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::sort::{SortBackend, SortConfig};
///
/// let config = SortConfig::builder()
///     .workers(4)
///     .max_depth(3)
///     .min_chunk(512)
///     .backend(SortBackend::ScopedThreads)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.workers(), 4);
/// assert_eq!(config.policy().max_depth(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    policy: ForkPolicy,
    workers: usize,
    backend: SortBackend,
}

impl SortConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SortConfigBuilder {
        SortConfigBuilder::default()
    }

    /// Returns the fan-out policy.
    #[inline]
    pub fn policy(&self) -> ForkPolicy {
        self.policy
    }

    /// Returns the resolved worker count (never 0).
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the execution backend.
    #[inline]
    pub fn backend(&self) -> SortBackend {
        self.backend
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        let workers = available_workers();
        Self {
            policy: ForkPolicy::for_workers(workers),
            workers,
            backend: SortBackend::default(),
        }
    }
}

/// Builder for [`SortConfig`].
#[derive(Clone, Debug, Default)]
pub struct SortConfigBuilder {
    max_depth: Option<usize>,
    min_chunk: Option<usize>,
    workers: usize,
    backend: SortBackend,
}

impl SortConfigBuilder {
    /// Sets the maximum fork depth.
    #[inline]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the minimum range length that may fork.
    #[inline]
    pub fn min_chunk(mut self, min_chunk: usize) -> Self {
        self.min_chunk = Some(min_chunk);
        self
    }

    /// Sets the worker count; 0 (the default) uses available parallelism.
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the execution backend.
    #[inline]
    pub fn backend(mut self, backend: SortBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Builds the configuration.
    ///
    /// Unset policy fields default to [`ForkPolicy::for_workers`] for the
    /// resolved worker count.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::InvalidPolicy`] if `max_depth` exceeds
    /// [`MAX_FORK_DEPTH`].
    pub fn build(self) -> Result<SortConfig, SortError> {
        let workers = resolve_workers(self.workers);
        let defaults = ForkPolicy::for_workers(workers);
        let policy = ForkPolicy::new(
            self.max_depth.unwrap_or(defaults.max_depth()),
            self.min_chunk.unwrap_or(defaults.min_chunk()),
        )?;

        Ok(SortConfig {
            policy,
            workers,
            backend: self.backend,
        })
    }
}
