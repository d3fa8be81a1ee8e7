//! Monte Carlo integration over the unit ball.
//!
//! Points are drawn uniformly from the bounding cube `[-1, 1]^3`; those
//! outside the unit sphere are rejected and contribute zero. The sum is
//! divided by the number of *draws*, not accepted hits, and scaled by the
//! cube volume, which makes the estimator unbiased for the ball integral.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloIntegrator
//! ├── IntegrationConfig  (samples, workers, seed)
//! ├── estimate()           one SampleRng, one PartialSum
//! └── estimate_parallel()
//!     ├── split_shares()   remainder to the last worker
//!     ├── shard w: SampleRng::for_worker(seed, w) → partials[w]
//!     └── merge after join → IntegrationResult
//! ```
//!
//! # Examples
//!
//! ```rust
//! use forkjoin_kernel::field::{GaussianBump, HalfSpace};
//! use forkjoin_kernel::mc::{parallel_integrate, SPHERE_VOLUME};
//!
//! let half = parallel_integrate(&HalfSpace, 400_000).unwrap();
//! assert!((half - SPHERE_VOLUME / 2.0).abs() / (SPHERE_VOLUME / 2.0) < 0.02);
//!
//! let gaussian = parallel_integrate(&GaussianBump, 400_000).unwrap();
//! assert!(gaussian > 0.0 && gaussian < SPHERE_VOLUME);
//! ```

pub mod accumulator;
pub mod config;
pub mod error;
pub mod integrator;
pub mod moments;
pub mod result;

// Re-exports for convenient access
pub use accumulator::{sample_ball, split_shares, PartialSum};
pub use config::{IntegrationConfig, IntegrationConfigBuilder, MAX_SAMPLES};
pub use error::IntegrationError;
pub use integrator::{integrate, parallel_integrate, MonteCarloIntegrator};
pub use moments::CentreOfMass;
pub use result::{IntegrationResult, CUBE_VOLUME, SPHERE_VOLUME};
