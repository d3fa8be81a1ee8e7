//! Integration estimate with its standard error.

use std::f64::consts::PI;

use super::accumulator::PartialSum;

/// Volume of the sampling cube `[-1, 1]^3`.
pub const CUBE_VOLUME: f64 = 8.0;

/// Volume of the unit ball, `4π/3`.
pub const SPHERE_VOLUME: f64 = 4.0 / 3.0 * PI;

/// Monte Carlo estimate of `∫_{unit ball} f dV`.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::mc::IntegrationResult;
///
/// let result = IntegrationResult {
///     value: 2.09,
///     std_error: 0.01,
///     samples: 1_000_000,
///     hits: 523_600,
///     workers: 4,
/// };
/// assert!((result.confidence_95() - 0.0196).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegrationResult {
    /// Estimated integral.
    pub value: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Points drawn from the cube.
    pub samples: usize,
    /// Points accepted inside the unit ball.
    pub hits: usize,
    /// Workers that drew samples.
    pub workers: usize,
}

impl IntegrationResult {
    /// Builds the estimate from merged partial sums.
    ///
    /// Each draw contributes `g = f·1_ball`, misses included, so the
    /// estimator divides by every draw and scales by the cube volume:
    /// `E[g]·8 = ∫_{ball} f dV`.
    pub(crate) fn from_partial(total: &PartialSum, workers: usize) -> Self {
        if total.samples == 0 {
            return Self {
                workers,
                ..Self::default()
            };
        }

        let n = total.samples as f64;
        let mean = total.sum / n;
        let mean_sq = total.sum_sq / n;
        let variance = (mean_sq - mean * mean).max(0.0);

        Self {
            value: CUBE_VOLUME * mean,
            std_error: CUBE_VOLUME * (variance / n).sqrt(),
            samples: total.samples,
            hits: total.hits,
            workers,
        }
    }

    /// Fraction of draws that landed inside the ball; tends to `π/6`.
    #[inline]
    pub fn acceptance_ratio(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.hits as f64 / self.samples as f64
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}
