//! Base density fields.

use super::{Point3, ScalarField};

/// Indicator of the half-space `x >= 0`.
///
/// Over the unit ball it integrates to half the ball's volume, `2π/3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HalfSpace;

impl ScalarField for HalfSpace {
    #[inline]
    fn evaluate(&self, x: f64, _y: f64, _z: f64) -> f64 {
        if x >= 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

/// Gaussian bump `exp(-(x² + y² + z²))`.
///
/// Not truncated at the unit sphere; the integrator's sampling domain
/// provides the cut-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GaussianBump;

impl ScalarField for GaussianBump {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        (-(x * x + y * y + z * z)).exp()
    }
}

/// Absolute-sum density `|x + y + z|`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsoluteSum;

impl ScalarField for AbsoluteSum {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        (x + y + z).abs()
    }
}

/// Squared distance to a centre, `(x-cx)² + (y-cy)² + (z-cz)²`.
///
/// The default centre is `(1, 2, 3)`.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::field::{QuadraticDistance, ScalarField};
///
/// let field = QuadraticDistance::default();
/// assert_eq!(field.evaluate(1.0, 2.0, 3.0), 0.0);
/// assert_eq!(field.evaluate(0.0, 0.0, 0.0), 14.0);
///
/// let origin = QuadraticDistance::centred_at(0.0, 0.0, 0.0);
/// assert_eq!(origin.evaluate(1.0, 0.0, 0.0), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticDistance {
    centre: Point3,
}

impl QuadraticDistance {
    /// Creates the field centred at `(x, y, z)`.
    #[inline]
    pub const fn centred_at(x: f64, y: f64, z: f64) -> Self {
        Self {
            centre: Point3::new(x, y, z),
        }
    }

    /// Returns the centre point.
    #[inline]
    pub fn centre(&self) -> Point3 {
        self.centre
    }
}

impl Default for QuadraticDistance {
    fn default() -> Self {
        Self::centred_at(1.0, 2.0, 3.0)
    }
}

impl ScalarField for QuadraticDistance {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        let dx = x - self.centre.x;
        let dy = y - self.centre.y;
        let dz = z - self.centre.z;
        dx * dx + dy * dy + dz * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_space_boundary() {
        assert_eq!(HalfSpace.evaluate(0.0, -1.0, -1.0), 1.0);
        assert_eq!(HalfSpace.evaluate(-1e-300, 0.0, 0.0), 0.0);
        assert_eq!(HalfSpace.evaluate(2.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_gaussian_bump_values() {
        assert_eq!(GaussianBump.evaluate(0.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(
            GaussianBump.evaluate(0.1, 0.2, 0.3),
            (-0.14_f64).exp(),
            epsilon = 1e-15
        );
        // No cut-off outside the unit sphere.
        assert_relative_eq!(
            GaussianBump.evaluate(2.0, 0.0, 0.0),
            (-4.0_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_absolute_sum_values() {
        assert_relative_eq!(AbsoluteSum.evaluate(-0.5, -0.25, 0.1), 0.65, epsilon = 1e-15);
        assert_eq!(AbsoluteSum.evaluate(1.0, -1.0, 0.0), 0.0);
    }

    #[test]
    fn test_quadratic_distance_values() {
        let field = QuadraticDistance::default();
        assert_eq!(field.centre(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(field.evaluate(1.0, 2.0, 4.0), 1.0);
        assert_eq!(field.evaluate(0.0, 0.0, 0.0), 14.0);
    }
}
