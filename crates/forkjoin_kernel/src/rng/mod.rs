//! # Random Number Generation
//!
//! One [`SampleRng`] per worker, created at worker start from either an
//! explicit base seed (reproducible runs) or operating-system entropy.
//! There is no process-wide generator: workers never share a stream, so
//! two workers cannot produce identical samples by construction.
//!
//! ## Usage Example
//!
//! ```rust
//! use forkjoin_kernel::rng::SampleRng;
//!
//! let mut rng = SampleRng::for_worker(Some(12345), 3);
//! let mut buffer = vec![0.0; 64];
//! rng.fill_symmetric(&mut buffer);
//! assert!(buffer.iter().all(|v| (-1.0..1.0).contains(v)));
//! ```

mod prng;

pub use prng::SampleRng;

#[cfg(test)]
mod tests;
