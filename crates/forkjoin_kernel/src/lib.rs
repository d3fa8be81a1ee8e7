//! # Fork/Join Kernels
//!
//! Two independent compute kernels with no shared state:
//!
//! - [`sort`]: in-place quicksort with Lomuto partitioning (pivot = last
//!   element), in a sequential form and a fork/join parallel form bounded by
//!   a [`ForkPolicy`](sort::ForkPolicy).
//! - [`mc`]: rejection-sampling Monte Carlo estimator of
//!   `∫_{unit ball} f(x, y, z) dV` over any [`ScalarField`](field::ScalarField),
//!   with the sample budget optionally sharded across worker threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use forkjoin_kernel::field::HalfSpace;
//! use forkjoin_kernel::mc::integrate;
//! use forkjoin_kernel::sort::{parallel_sort, sort};
//!
//! let mut data = vec![5_i64, 3, 8, 1, 9, 2];
//! sort(&mut data, 0, 5).unwrap();
//! assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
//!
//! let mut data = vec![5_i64, 3, 8, 1, 9, 2];
//! parallel_sort(&mut data, 0, 5).unwrap();
//! assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
//!
//! let half_ball = integrate(&HalfSpace, 100_000).unwrap();
//! assert!((half_ball - 2.0 * std::f64::consts::PI / 3.0).abs() < 0.1);
//! ```
//!
//! ## Module Structure
//!
//! - [`sort`]: partition, sequential and parallel quicksort, fan-out policy
//! - [`field`]: scalar field trait and its variants
//! - [`rng`]: per-worker sample generator
//! - [`mc`]: sequential and parallel integrators, centre-of-mass helper
//! - [`parallel`]: hardware concurrency and thread pool helpers

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod field;
pub mod mc;
pub mod parallel;
pub mod rng;
pub mod sort;

// Re-export commonly used items for convenience
pub use field::{Axis, Field, FieldKind, Point3, ScalarField, Weighted};
pub use mc::{
    integrate, parallel_integrate, IntegrationConfig, IntegrationError, IntegrationResult,
    MonteCarloIntegrator,
};
pub use sort::{
    parallel_sort, partition, sort, sort_all, ForkPolicy, ParallelSorter, SortBackend, SortConfig,
    SortError, SortReport,
};
