//! In-place quicksort, sequential and fork/join parallel.
//!
//! # Architecture
//!
//! ```text
//! sort / sort_all ──────────────► quicksort (smaller side recursive,
//!                                            larger side iterative)
//! parallel_sort ─► ParallelSorter
//!                  ├── SortConfig  (ForkPolicy, workers, SortBackend)
//!                  ├── WorkStealing: rayon::join on a dedicated pool
//!                  └── ScopedThreads: std::thread::Builder::spawn_scoped
//!                          │
//!                          └── below the fan-out limit ─► quicksort
//! ```
//!
//! Every path partitions with [`partition`]'s Lomuto scheme, taking the
//! last element of the range as pivot.

pub mod config;
pub mod error;
pub mod parallel;
pub mod partition;
pub mod sequential;

// Re-exports for convenient access
pub use config::{
    ForkPolicy, SortBackend, SortConfig, SortConfigBuilder, DEFAULT_MIN_CHUNK, MAX_FORK_DEPTH,
};
pub use error::SortError;
pub use parallel::{parallel_sort, ParallelSorter, SortReport};
pub use partition::partition;
pub use sequential::{sort, sort_all};
