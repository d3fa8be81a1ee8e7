//! Centre-of-mass command implementation
//!
//! Treats a scalar field as a density over the unit ball and reports its
//! mass, first moments and centroid.

use std::time::Instant;

use forkjoin_kernel::field::{Axis, FieldKind, Point3};
use forkjoin_kernel::mc::{CentreOfMass, MonteCarloIntegrator};
use serde::Serialize;
use tracing::{info, warn};

use super::integrate::resolve_field;
use super::{emit, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Outcome of one centre-of-mass run
#[derive(Debug, Clone, Serialize)]
pub struct CentreOfMassSummary {
    /// Density field name
    pub field: String,
    /// Whether each integral was sharded across workers
    pub parallel: bool,
    /// Wall time in milliseconds for all four integrals
    pub elapsed_ms: f64,
    /// Mass and moments
    pub estimate: CentreOfMass,
    /// `[x, y, z]`, absent when the mass estimate is zero
    pub centroid: Option<[f64; 3]>,
}

/// Estimates mass, moments and centroid of one density.
pub fn execute(
    config: &CliConfig,
    field: FieldKind,
    samples: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
) -> Result<CentreOfMassSummary> {
    let mc_config = config.integration_config(samples, seed, parallel)?;
    let integrator = MonteCarloIntegrator::new(mc_config)?;
    let density = field.build();

    let start = Instant::now();
    let estimate = integrator.centre_of_mass(&density, parallel)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    Ok(CentreOfMassSummary {
        field: field.to_string(),
        parallel,
        elapsed_ms,
        centroid: estimate.centroid().map(|Point3 { x, y, z }| [x, y, z]),
        estimate,
    })
}

/// Run the centre-of-mass command
pub fn run(
    config: &CliConfig,
    field: Option<&str>,
    samples: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let field = resolve_field(config, field)?;

    info!("Starting centre-of-mass estimate...");
    info!("  Density: {}", field);

    let summary = execute(config, field, samples, seed, parallel)?;
    let estimate = &summary.estimate;

    let centroid = match summary.centroid {
        Some([x, y, z]) => format!("({:.4}, {:.4}, {:.4})", x, y, z),
        None => {
            warn!("Estimated mass is zero, centroid undefined");
            "undefined (zero mass)".to_string()
        }
    };

    let mut rows = vec![
        ("Density", summary.field.clone()),
        (
            "Mass",
            format!("{:.6} ± {:.6}", estimate.mass.value, estimate.mass.confidence_95()),
        ),
    ];
    for (axis, moment) in Axis::ALL.iter().zip(&estimate.moments) {
        let label = match axis {
            Axis::X => "Moment x",
            Axis::Y => "Moment y",
            Axis::Z => "Moment z",
        };
        rows.push((label, format!("{:.6} ± {:.6}", moment.value, moment.confidence_95())));
    }
    rows.push(("Centroid", centroid));
    rows.push(("Samples per integral", estimate.mass.samples.to_string()));
    rows.push(("Elapsed", format!("{:.3} ms", summary.elapsed_ms)));

    emit(format, &summary, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_centroid() {
        let mut config = CliConfig::default();
        config.integrate.workers = 2;

        let summary = execute(&config, FieldKind::HalfSpace, Some(400_000), Some(21), true).unwrap();
        let [x, y, z] = summary.centroid.unwrap();

        assert!((x - 0.375).abs() < 0.02, "x = {}", x);
        assert!(y.abs() < 0.02, "y = {}", y);
        assert!(z.abs() < 0.02, "z = {}", z);
    }

    #[test]
    fn test_summary_serialises() {
        let summary =
            execute(&CliConfig::default(), FieldKind::Gaussian, Some(1_000), Some(2), false).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["field"], "gaussian");
        assert_eq!(json["estimate"]["moments"].as_array().unwrap().len(), 3);
        assert_eq!(json["estimate"]["mass"]["samples"], 1_000);
    }
}
