//! Scalar fields evaluated by the Monte Carlo integrator.
//!
//! A [`ScalarField`] is any pure function of a point in space. The closed
//! set of built-in variants lives in [`density`] and [`weighted`]; the
//! [`Field`] enum wraps them for callers that pick a field at run time.
//!
//! All variants are immutable and `Send + Sync`, so one instance can be
//! evaluated from every worker thread at once.

pub mod density;
pub mod weighted;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use density::{AbsoluteSum, GaussianBump, HalfSpace, QuadraticDistance};
pub use weighted::{Axis, Weighted};

/// A point in three-dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Creates a point from its coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance from the origin.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Whether the point lies in the closed unit ball.
    #[inline]
    pub fn in_unit_ball(&self) -> bool {
        self.norm_squared() <= 1.0
    }
}

/// A scalar field `f(x, y, z)`.
///
/// `evaluate` must be a pure function of its inputs: no interior
/// mutability, no randomness. Integration estimates are reproducible for a
/// fixed sample stream only under that contract.
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::field::{ScalarField, Weighted, Axis, GaussianBump};
///
/// let density = GaussianBump;
/// let x_moment = Weighted::new(Axis::X, &density);
///
/// let value = density.evaluate(0.1, 0.2, 0.3);
/// assert!((x_moment.evaluate(0.1, 0.2, 0.3) - 0.1 * value).abs() < 1e-15);
/// ```
pub trait ScalarField: Send + Sync {
    /// Evaluates the field at `(x, y, z)`.
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64;

    /// Evaluates the field at `point`.
    #[inline]
    fn evaluate_at(&self, point: Point3) -> f64 {
        self.evaluate(point.x, point.y, point.z)
    }
}

impl<F: ScalarField + ?Sized> ScalarField for &F {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).evaluate(x, y, z)
    }
}

impl<F: ScalarField + ?Sized> ScalarField for Box<F> {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).evaluate(x, y, z)
    }
}

impl<F: ScalarField + ?Sized> ScalarField for Arc<F> {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).evaluate(x, y, z)
    }
}

/// Closed set of built-in fields, selectable at run time.
///
/// Weighted variants own their inner field through a `Box`, so nesting is
/// a tree and cannot form a cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// `1` for `x >= 0`, otherwise `0`.
    HalfSpace(HalfSpace),
    /// `exp(-(x² + y² + z²))`.
    GaussianBump(GaussianBump),
    /// `|x + y + z|`.
    AbsoluteSum(AbsoluteSum),
    /// Squared distance to a centre point.
    QuadraticDistance(QuadraticDistance),
    /// Inner field multiplied by one coordinate.
    Weighted(Weighted<Box<Field>>),
}

impl Field {
    /// Wraps this field so it is multiplied by the `axis` coordinate.
    pub fn weighted(self, axis: Axis) -> Self {
        Self::Weighted(Weighted::new(axis, Box::new(self)))
    }
}

impl ScalarField for Field {
    #[inline]
    fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Self::HalfSpace(field) => field.evaluate(x, y, z),
            Self::GaussianBump(field) => field.evaluate(x, y, z),
            Self::AbsoluteSum(field) => field.evaluate(x, y, z),
            Self::QuadraticDistance(field) => field.evaluate(x, y, z),
            Self::Weighted(field) => field.evaluate(x, y, z),
        }
    }
}

/// Names of the base field variants, parsed from configuration and CLI
/// arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// [`HalfSpace`].
    HalfSpace,
    /// [`GaussianBump`].
    Gaussian,
    /// [`AbsoluteSum`].
    AbsoluteSum,
    /// [`QuadraticDistance`] around the default centre.
    Quadratic,
}

impl FieldKind {
    /// All kinds, in display order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::HalfSpace,
        FieldKind::Gaussian,
        FieldKind::AbsoluteSum,
        FieldKind::Quadratic,
    ];

    /// Constructs the field this kind names.
    pub fn build(self) -> Field {
        match self {
            Self::HalfSpace => Field::HalfSpace(HalfSpace),
            Self::Gaussian => Field::GaussianBump(GaussianBump),
            Self::AbsoluteSum => Field::AbsoluteSum(AbsoluteSum),
            Self::Quadratic => Field::QuadraticDistance(QuadraticDistance::default()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HalfSpace => "half-space",
            Self::Gaussian => "gaussian",
            Self::AbsoluteSum => "absolute-sum",
            Self::Quadratic => "quadratic",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{0}'. Supported: half-space, gaussian, absolute-sum, quadratic")]
pub struct UnknownField(pub String);

impl FromStr for FieldKind {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half-space" | "halfspace" => Ok(Self::HalfSpace),
            "gaussian" | "gaussian-bump" => Ok(Self::Gaussian),
            "absolute-sum" | "abs-sum" => Ok(Self::AbsoluteSum),
            "quadratic" | "quadratic-distance" => Ok(Self::Quadratic),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
