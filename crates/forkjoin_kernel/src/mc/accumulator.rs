//! Per-worker sampling loop and its partial accumulator.

use crate::field::ScalarField;
use crate::rng::SampleRng;

/// Running sums owned by exactly one worker.
///
/// Misses add to `samples` only; their integrand value is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartialSum {
    /// Sum of field values at accepted points.
    pub sum: f64,
    /// Sum of squared field values at accepted points.
    pub sum_sq: f64,
    /// Points that fell inside the unit ball.
    pub hits: usize,
    /// Points drawn, accepted or not.
    pub samples: usize,
}

impl PartialSum {
    /// Records a point inside the ball with field value `value`.
    #[inline]
    pub fn record_hit(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.hits += 1;
    }

    /// Adds another worker's sums into this one.
    #[inline]
    pub fn merge(&mut self, other: &PartialSum) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.hits += other.hits;
        self.samples += other.samples;
    }
}

/// Draws `samples` points from the cube `[-1, 1)^3` and accumulates
/// `field` over those inside the closed unit ball.
pub fn sample_ball<F: ScalarField + ?Sized>(
    field: &F,
    rng: &mut SampleRng,
    samples: usize,
) -> PartialSum {
    let mut partial = PartialSum {
        samples,
        ..PartialSum::default()
    };
    for _ in 0..samples {
        let point = rng.sample_cube();
        if point.in_unit_ball() {
            partial.record_hit(field.evaluate_at(point));
        }
    }
    partial
}

/// Splits `total` into `workers` contiguous shares; the last share takes
/// the remainder so the shares sum to `total` exactly.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::mc::split_shares;
///
/// assert_eq!(split_shares(10, 3), vec![3, 3, 4]);
/// assert_eq!(split_shares(2, 4), vec![0, 0, 0, 2]);
/// ```
pub fn split_shares(total: usize, workers: usize) -> Vec<usize> {
    let workers = workers.max(1);
    let base = total / workers;
    let mut shares = vec![base; workers];
    if let Some(last) = shares.last_mut() {
        *last += total % workers;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{GaussianBump, HalfSpace};

    #[test]
    fn test_split_shares_sum_exactly() {
        for total in [1, 7, 100, 1_000_003] {
            for workers in [1, 2, 3, 8, 13] {
                let shares = split_shares(total, workers);
                assert_eq!(shares.len(), workers);
                assert_eq!(shares.iter().sum::<usize>(), total);
                assert!(shares[..workers - 1].iter().all(|&s| s == total / workers));
            }
        }
    }

    #[test]
    fn test_split_shares_zero_workers() {
        assert_eq!(split_shares(5, 0), vec![5]);
    }

    #[test]
    fn test_merge() {
        let mut a = PartialSum {
            sum: 1.0,
            sum_sq: 2.0,
            hits: 3,
            samples: 4,
        };
        let b = PartialSum {
            sum: 0.5,
            sum_sq: 0.25,
            hits: 1,
            samples: 6,
        };
        a.merge(&b);
        assert_eq!(
            a,
            PartialSum {
                sum: 1.5,
                sum_sq: 2.25,
                hits: 4,
                samples: 10,
            }
        );
    }

    #[test]
    fn test_sample_ball_counts() {
        let mut rng = SampleRng::from_seed(3);
        let partial = sample_ball(&GaussianBump, &mut rng, 10_000);

        assert_eq!(partial.samples, 10_000);
        assert!(partial.hits > 0 && partial.hits < 10_000);
        // Acceptance ratio approaches π/6 ≈ 0.5236.
        let ratio = partial.hits as f64 / partial.samples as f64;
        assert!((ratio - std::f64::consts::PI / 6.0).abs() < 0.03);
    }

    #[test]
    fn test_indicator_sum_equals_sum_sq() {
        let mut rng = SampleRng::from_seed(8);
        let partial = sample_ball(&HalfSpace, &mut rng, 5_000);
        assert_eq!(partial.sum, partial.sum_sq);
    }
}
