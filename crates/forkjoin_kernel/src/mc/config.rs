//! Monte Carlo integration configuration.

use super::error::IntegrationError;
use crate::parallel::resolve_workers;

/// Maximum number of samples allowed per estimate.
pub const MAX_SAMPLES: usize = 1_000_000_000;

/// Immutable integration configuration.
///
/// Use [`IntegrationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::mc::IntegrationConfig;
///
/// let config = IntegrationConfig::builder()
///     .samples(1_000_000)
///     .workers(4)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.samples(), 1_000_000);
/// assert_eq!(config.workers(), 4);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegrationConfig {
    /// Total number of cube samples.
    samples: usize,
    /// Worker threads for parallel estimates (resolved, never 0).
    workers: usize,
    /// Optional base seed; `None` seeds every worker from OS entropy.
    seed: Option<u64>,
}

impl IntegrationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> IntegrationConfigBuilder {
        IntegrationConfigBuilder::default()
    }

    /// Returns the total sample count.
    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the worker count.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the optional base seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`IntegrationError::ZeroSamples`] if `samples` is 0
    /// - [`IntegrationError::TooManySamples`] if `samples` exceeds [`MAX_SAMPLES`]
    pub fn validate(&self) -> Result<(), IntegrationError> {
        validate_samples(self.samples)
    }
}

/// Checks a sample count against `[1, MAX_SAMPLES]`.
pub(crate) fn validate_samples(samples: usize) -> Result<(), IntegrationError> {
    if samples == 0 {
        return Err(IntegrationError::ZeroSamples);
    }
    if samples > MAX_SAMPLES {
        return Err(IntegrationError::TooManySamples(samples));
    }
    Ok(())
}

/// Builder for [`IntegrationConfig`].
#[derive(Clone, Debug, Default)]
pub struct IntegrationConfigBuilder {
    samples: Option<usize>,
    workers: usize,
    seed: Option<u64>,
}

impl IntegrationConfigBuilder {
    /// Sets the total number of samples in `[1, MAX_SAMPLES]`.
    #[inline]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Sets the worker count; 0 (the default) uses available parallelism.
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the base seed for reproducible estimates.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the base seed.
    #[inline]
    pub fn seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError` if `samples` is unset or invalid.
    pub fn build(self) -> Result<IntegrationConfig, IntegrationError> {
        let samples = self.samples.ok_or(IntegrationError::InvalidConfig {
            name: "samples",
            reason: "must be specified".to_string(),
        })?;

        let config = IntegrationConfig {
            samples,
            workers: resolve_workers(self.workers),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
