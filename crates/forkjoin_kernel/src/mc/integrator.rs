//! Sequential and parallel rejection-sampling integrators.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, trace, warn};

use super::accumulator::{sample_ball, split_shares, PartialSum};
use super::config::IntegrationConfig;
use super::error::IntegrationError;
use super::result::IntegrationResult;
use crate::field::ScalarField;
use crate::parallel::{available_workers, build_pool, panic_message};
use crate::rng::SampleRng;

/// Monte Carlo integrator over the unit ball.
///
/// Holds a validated [`IntegrationConfig`] and, when more than one shard
/// can run, a Rayon pool built once at construction. Without a pool the
/// shards run one after another with the same seeds, so seeded results
/// match the pooled run exactly.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::field::HalfSpace;
/// use forkjoin_kernel::mc::{IntegrationConfig, MonteCarloIntegrator};
///
/// let config = IntegrationConfig::builder()
///     .samples(200_000)
///     .workers(4)
///     .seed(42)
///     .build()
///     .unwrap();
/// let integrator = MonteCarloIntegrator::new(config).unwrap();
///
/// let result = integrator.estimate_parallel(&HalfSpace).unwrap();
/// let exact = 2.0 * std::f64::consts::PI / 3.0;
/// assert!((result.value - exact).abs() < 5.0 * result.std_error);
/// assert_eq!(result.samples, 200_000);
/// ```
pub struct MonteCarloIntegrator {
    config: IntegrationConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl MonteCarloIntegrator {
    /// Creates an integrator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError` if the configuration fails validation.
    pub fn new(config: IntegrationConfig) -> Result<Self, IntegrationError> {
        config.validate()?;

        let pool = dedicated_pool(config.workers().min(config.samples()));
        Ok(Self { config, pool })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Estimates `∫_{unit ball} field dV` on the calling thread.
    pub fn estimate<F: ScalarField + ?Sized>(&self, field: &F) -> IntegrationResult {
        let mut rng = SampleRng::for_worker(self.config.seed(), 0);
        let partial = sample_ball(field, &mut rng, self.config.samples());
        let result = IntegrationResult::from_partial(&partial, 1);

        debug!(
            samples = result.samples,
            hits = result.hits,
            seed = rng.seed(),
            value = result.value,
            std_error = result.std_error,
            "sequential integration finished"
        );
        result
    }

    /// Estimates `∫_{unit ball} field dV` with the sample budget sharded
    /// across workers.
    ///
    /// Shard `w` draws from its own generator and writes only partial sum
    /// slot `w`; slots are merged after every shard has finished, then
    /// scaled exactly as in [`estimate`](Self::estimate). With a base seed
    /// the result does not depend on thread scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::WorkerPanicked`] if a shard panicked
    /// while evaluating the field.
    pub fn estimate_parallel<F: ScalarField + ?Sized>(
        &self,
        field: &F,
    ) -> Result<IntegrationResult, IntegrationError> {
        let samples = self.config.samples();
        let workers = self.config.workers().min(samples);
        let shares = split_shares(samples, workers);
        let seed = self.config.seed();
        let mut partials = vec![PartialSum::default(); workers];

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match &self.pool {
            Some(pool) if workers > 1 => pool.install(|| {
                partials
                    .par_iter_mut()
                    .zip(shares.par_iter())
                    .enumerate()
                    .for_each(|(worker, (slot, &share))| {
                        let mut rng = SampleRng::for_worker(seed, worker);
                        *slot = sample_ball(field, &mut rng, share);
                        trace!(worker, share, hits = slot.hits, seed = rng.seed(), "shard finished");
                    })
            }),
            _ => {
                for (worker, (slot, &share)) in partials.iter_mut().zip(&shares).enumerate() {
                    let mut rng = SampleRng::for_worker(seed, worker);
                    *slot = sample_ball(field, &mut rng, share);
                }
            }
        }));
        outcome.map_err(|payload| IntegrationError::WorkerPanicked(panic_message(&*payload)))?;

        let mut total = PartialSum::default();
        for partial in &partials {
            total.merge(partial);
        }
        let result = IntegrationResult::from_partial(&total, workers);

        debug!(
            samples = result.samples,
            hits = result.hits,
            workers,
            value = result.value,
            std_error = result.std_error,
            "parallel integration finished"
        );
        Ok(result)
    }

    /// Sequential estimate of the integral's value.
    #[inline]
    pub fn integrate<F: ScalarField + ?Sized>(&self, field: &F) -> f64 {
        self.estimate(field).value
    }

    /// Parallel estimate of the integral's value.
    ///
    /// # Errors
    ///
    /// See [`estimate_parallel`](Self::estimate_parallel).
    #[inline]
    pub fn integrate_parallel<F: ScalarField + ?Sized>(
        &self,
        field: &F,
    ) -> Result<f64, IntegrationError> {
        self.estimate_parallel(field).map(|result| result.value)
    }

    /// Runs either estimator.
    pub(crate) fn run<F: ScalarField + ?Sized>(
        &self,
        field: &F,
        parallel: bool,
    ) -> Result<IntegrationResult, IntegrationError> {
        if parallel {
            self.estimate_parallel(field)
        } else {
            Ok(self.estimate(field))
        }
    }
}

fn dedicated_pool(workers: usize) -> Option<Arc<ThreadPool>> {
    if workers <= 1 {
        return None;
    }
    match build_pool(workers, "forkjoin-mc") {
        Ok(pool) => Some(Arc::new(pool)),
        Err(err) => {
            warn!(workers, error = %err, "integration pool unavailable, shards will run sequentially");
            None
        }
    }
}

/// Pool behind [`parallel_integrate`], sized to the host once per process.
fn shared_pool() -> Option<Arc<ThreadPool>> {
    static SHARED: OnceLock<Option<Arc<ThreadPool>>> = OnceLock::new();
    SHARED.get_or_init(|| dedicated_pool(available_workers())).clone()
}

/// Estimates `∫_{unit ball} field dV` from `sample_count` draws on the
/// calling thread, seeded from OS entropy.
///
/// # Errors
///
/// Returns [`IntegrationError::ZeroSamples`] for `sample_count == 0` and
/// [`IntegrationError::TooManySamples`] above the sample limit.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::field::HalfSpace;
/// use forkjoin_kernel::mc::{integrate, IntegrationError};
///
/// let estimate = integrate(&HalfSpace, 100_000).unwrap();
/// assert!((estimate - 2.0 * std::f64::consts::PI / 3.0).abs() < 0.1);
///
/// assert_eq!(integrate(&HalfSpace, 0), Err(IntegrationError::ZeroSamples));
/// ```
pub fn integrate<F: ScalarField + ?Sized>(
    field: &F,
    sample_count: usize,
) -> Result<f64, IntegrationError> {
    let config = IntegrationConfig::builder()
        .samples(sample_count)
        .workers(1)
        .build()?;
    Ok(MonteCarloIntegrator::new(config)?.integrate(field))
}

/// Estimates `∫_{unit ball} field dV` from `sample_count` draws sharded
/// across the host's available parallelism, each worker seeded from OS
/// entropy.
///
/// All calls share one process-wide worker pool.
///
/// # Errors
///
/// Same validation as [`integrate`], plus
/// [`IntegrationError::WorkerPanicked`].
pub fn parallel_integrate<F: ScalarField + ?Sized>(
    field: &F,
    sample_count: usize,
) -> Result<f64, IntegrationError> {
    let config = IntegrationConfig::builder().samples(sample_count).build()?;
    let pool = if config.workers().min(config.samples()) > 1 {
        shared_pool()
    } else {
        None
    };
    MonteCarloIntegrator { config, pool }.integrate_parallel(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{GaussianBump, HalfSpace};
    use std::f64::consts::PI;

    fn integrator(samples: usize, workers: usize, seed: u64) -> MonteCarloIntegrator {
        let config = IntegrationConfig::builder()
            .samples(samples)
            .workers(workers)
            .seed(seed)
            .build()
            .unwrap();
        MonteCarloIntegrator::new(config).unwrap()
    }

    #[test]
    fn test_seeded_estimates_are_reproducible() {
        let a = integrator(50_000, 1, 17).estimate(&GaussianBump);
        let b = integrator(50_000, 1, 17).estimate(&GaussianBump);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_parallel_is_schedule_independent() {
        let a = integrator(100_000, 4, 17).estimate_parallel(&GaussianBump).unwrap();
        let b = integrator(100_000, 4, 17).estimate_parallel(&GaussianBump).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.workers, 4);
        assert_eq!(a.samples, 100_000);
    }

    #[test]
    fn test_single_worker_parallel_matches_sequential() {
        let seq = integrator(20_000, 1, 5).estimate(&HalfSpace);
        let par = integrator(20_000, 1, 5).estimate_parallel(&HalfSpace).unwrap();
        assert_eq!(seq.value, par.value);
        assert_eq!(seq.hits, par.hits);
    }

    #[test]
    fn test_workers_capped_by_samples() {
        let result = integrator(3, 8, 1).estimate_parallel(&HalfSpace).unwrap();
        assert_eq!(result.workers, 3);
        assert_eq!(result.samples, 3);
    }

    #[test]
    fn test_remainder_samples_are_drawn() {
        let result = integrator(10_007, 4, 2).estimate_parallel(&HalfSpace).unwrap();
        assert_eq!(result.samples, 10_007);
    }

    #[test]
    fn test_free_functions_validate() {
        assert_eq!(integrate(&HalfSpace, 0), Err(IntegrationError::ZeroSamples));
        assert_eq!(
            parallel_integrate(&HalfSpace, 0),
            Err(IntegrationError::ZeroSamples)
        );
    }

    #[test]
    fn test_single_sample_is_valid() {
        let value = integrate(&HalfSpace, 1).unwrap();
        // One draw: either a miss (0) or a hit scaled by the cube volume.
        assert!(value == 0.0 || value == 8.0);
    }

    #[test]
    fn test_half_space_close_to_half_ball() {
        let result = integrator(200_000, 2, 99).estimate(&HalfSpace);
        assert!((result.value - 2.0 * PI / 3.0).abs() < 5.0 * result.std_error);
    }

    struct Exploding;

    impl ScalarField for Exploding {
        fn evaluate(&self, x: f64, _y: f64, _z: f64) -> f64 {
            if x > 0.9 {
                panic!("field blew up");
            }
            1.0
        }
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let err = integrator(100_000, 4, 1)
            .estimate_parallel(&Exploding)
            .unwrap_err();
        match err {
            IntegrationError::WorkerPanicked(message) => assert!(message.contains("blew up")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_pool_runs_shards_in_turn() {
        let pooled = integrator(100_000, 4, 23);
        assert!(pooled.pool.is_some());
        let unpooled = MonteCarloIntegrator {
            config: *pooled.config(),
            pool: None,
        };

        let expected = pooled.estimate_parallel(&GaussianBump).unwrap();
        let fallback = unpooled.estimate_parallel(&GaussianBump).unwrap();
        assert_eq!(fallback, expected);
        assert_eq!(fallback.workers, 4);
        assert_eq!(fallback.samples, 100_000);
    }

    #[test]
    fn test_missing_pool_still_reports_panics() {
        let unpooled = MonteCarloIntegrator {
            config: *integrator(100_000, 4, 1).config(),
            pool: None,
        };
        assert!(matches!(
            unpooled.estimate_parallel(&Exploding),
            Err(IntegrationError::WorkerPanicked(_))
        ));
    }

    #[test]
    fn test_single_shard_builds_no_pool() {
        assert!(integrator(1, 8, 3).pool.is_none());
        assert!(integrator(10_000, 1, 3).pool.is_none());
    }

    #[test]
    fn test_free_function_shares_one_pool() {
        match (shared_pool(), shared_pool()) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(&a, &b)),
            (None, None) => {}
            _ => panic!("shared pool changed between calls"),
        }
        for _ in 0..20 {
            let value = parallel_integrate(&HalfSpace, 1_000).unwrap();
            assert!((0.0..=8.0).contains(&value));
        }
    }
}
