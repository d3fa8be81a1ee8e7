//! Centre of mass of a density over the unit ball.

use super::error::IntegrationError;
use super::integrator::MonteCarloIntegrator;
use super::result::IntegrationResult;
use crate::field::{Axis, Point3, ScalarField, Weighted};

/// Mass and first moments of a density over the unit ball.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CentreOfMass {
    /// `∫ ρ dV`.
    pub mass: IntegrationResult,
    /// `∫ x·ρ dV`, `∫ y·ρ dV`, `∫ z·ρ dV`.
    pub moments: [IntegrationResult; 3],
}

impl CentreOfMass {
    /// Centroid `(Mx/M, My/M, Mz/M)`, or `None` when the estimated mass
    /// is zero.
    pub fn centroid(&self) -> Option<Point3> {
        let mass = self.mass.value;
        if mass == 0.0 {
            return None;
        }
        Some(Point3::new(
            self.moments[0].value / mass,
            self.moments[1].value / mass,
            self.moments[2].value / mass,
        ))
    }
}

impl MonteCarloIntegrator {
    /// Estimates the mass and first moments of `density`.
    ///
    /// Each moment integrates `Weighted::new(axis, density)`. With a base
    /// seed all four integrals reuse the same sample stream, which
    /// correlates numerator and denominator and tightens the centroid.
    ///
    /// # Errors
    ///
    /// Propagates [`IntegrationError::WorkerPanicked`] from parallel runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkjoin_kernel::field::HalfSpace;
    /// use forkjoin_kernel::mc::{IntegrationConfig, MonteCarloIntegrator};
    ///
    /// let config = IntegrationConfig::builder()
    ///     .samples(200_000)
    ///     .seed(3)
    ///     .build()
    ///     .unwrap();
    /// let integrator = MonteCarloIntegrator::new(config).unwrap();
    ///
    /// // Solid hemisphere x >= 0: centroid at (3/8, 0, 0).
    /// let com = integrator.centre_of_mass(&HalfSpace, false).unwrap();
    /// let centroid = com.centroid().unwrap();
    /// assert!((centroid.x - 0.375).abs() < 0.02);
    /// assert!(centroid.y.abs() < 0.02);
    /// ```
    pub fn centre_of_mass<F: ScalarField + ?Sized>(
        &self,
        density: &F,
        parallel: bool,
    ) -> Result<CentreOfMass, IntegrationError> {
        let mass = self.run(density, parallel)?;

        let mut moments = [IntegrationResult::default(); 3];
        for (slot, axis) in moments.iter_mut().zip(Axis::ALL) {
            *slot = self.run(&Weighted::new(axis, density), parallel)?;
        }

        Ok(CentreOfMass { mass, moments })
    }
}
