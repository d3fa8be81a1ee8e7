//! Integrate command implementation
//!
//! Estimates the integral of a named scalar field over the unit ball.

use std::time::Instant;

use forkjoin_kernel::field::FieldKind;
use forkjoin_kernel::mc::{IntegrationResult, MonteCarloIntegrator};
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Outcome of one integration run
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationSummary {
    /// Field name
    pub field: String,
    /// Whether the sample budget was sharded across workers
    pub parallel: bool,
    /// Base seed, if the run was seeded
    pub seed: Option<u64>,
    /// Wall time in milliseconds
    pub elapsed_ms: f64,
    /// Estimate and its error
    pub result: IntegrationResult,
}

/// Resolves the field name from the command line or configuration.
pub(crate) fn resolve_field(config: &CliConfig, field: Option<&str>) -> Result<FieldKind> {
    Ok(field.unwrap_or(config.integrate.field.as_str()).parse()?)
}

/// Runs one integration.
pub fn execute(
    config: &CliConfig,
    field: FieldKind,
    samples: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
) -> Result<IntegrationSummary> {
    let mc_config = config.integration_config(samples, seed, parallel)?;
    let integrator = MonteCarloIntegrator::new(mc_config)?;
    let density = field.build();

    let start = Instant::now();
    let result = if parallel {
        integrator.estimate_parallel(&density)?
    } else {
        integrator.estimate(&density)
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    Ok(IntegrationSummary {
        field: field.to_string(),
        parallel,
        seed: mc_config.seed(),
        elapsed_ms,
        result,
    })
}

/// Run the integrate command
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

    info!("Starting integration...");
    info!("  Field: {}", field);
    info!("  Parallel: {}", parallel);

    let summary = execute(config, field, samples, seed, parallel)?;
    let result = &summary.result;

    info!(value = result.value, std_error = result.std_error, "Integration complete");

    let rows = [
        ("Field", summary.field.clone()),
        ("Estimate", format!("{:.6}", result.value)),
        ("Std error", format!("{:.6}", result.std_error)),
        ("95% CI", format!("± {:.6}", result.confidence_95())),
        ("Samples", result.samples.to_string()),
        ("Hits", format!("{} ({:.4})", result.hits, result.acceptance_ratio())),
        ("Workers", result.workers.to_string()),
        ("Elapsed", format!("{:.3} ms", summary.elapsed_ms)),
    ];
    emit(format, &summary, &rows)
}
