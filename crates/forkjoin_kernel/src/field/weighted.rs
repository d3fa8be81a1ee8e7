//! Coordinate-weighted wrappers for first-moment integrals.
//!
//! `∫ x·ρ dV / ∫ ρ dV` is the x coordinate of the centre of mass of a body
//! with density `ρ`; [`Weighted`] supplies the numerator's integrand.

use super::ScalarField;

/// Coordinate axis selecting which component weights a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Weight by `x`.
    X,
    /// Weight by `y`.
    Y,
    /// Weight by `z`.
    Z,
}

impl Axis {
    /// All axes in `x, y, z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Selects this axis's coordinate.
    #[inline]
    pub fn component(self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::Z => z,
        }
    }
}

/// Field `axis_coordinate · inner(x, y, z)`.
///
/// `F` may be an owned field, a reference (`&F`) or a boxed trait object.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::field::{Axis, HalfSpace, ScalarField, Weighted};
///
/// let y_moment = Weighted::y(HalfSpace);
/// assert_eq!(y_moment.evaluate(0.5, -0.25, 0.0), -0.25);
/// assert_eq!(y_moment.evaluate(-0.5, -0.25, 0.0), 0.0);
/// assert_eq!(y_moment.axis(), Axis::Y);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Weighted<F> {
    axis: Axis,
    inner: F,
}

impl<F: ScalarField> Weighted<F> {
    /// Weights `inner` by the `axis` coordinate.
    #[inline]
    pub fn new(axis: Axis, inner: F) -> Self {
        Self { axis, inner }
    }

    /// `x · inner`.
    #[inline]
    pub fn x(inner: F) -> Self {
        Self::new(Axis::X, inner)
    }

    /// `y · inner`.
    #[inline]
    pub fn y(inner: F) -> Self {
        Self::new(Axis::Y, inner)
    }

    /// `z · inner`.
    #[inline]
    pub fn z(inner: F) -> Self {
        Self::new(Axis::Z, inner)
    }

    /// Returns the weighting axis.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the wrapped field.
    #[inline]
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: ScalarField> ScalarField for Weighted<F> {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.axis.component(x, y, z) * self.inner.evaluate(x, y, z)
    }
}
