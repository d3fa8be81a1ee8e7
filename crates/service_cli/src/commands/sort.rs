//! Sort command implementation
//!
//! Fills two identical buffers with pseudo-random integers, sorts one with
//! the sequential quicksort and the other with the parallel sorter, then
//! checks both are sorted and identical.

use std::time::Instant;

use forkjoin_kernel::rng::SampleRng;
use forkjoin_kernel::sort::{sort_all, ParallelSorter, SortBackend, SortReport};
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Outcome of one sort comparison run
#[derive(Debug, Clone, Serialize)]
pub struct SortSummary {
    /// Elements sorted
    pub size: usize,
    /// Parallel backend used
    pub backend: String,
    /// Worker threads configured
    pub workers: usize,
    /// Fork depth limit
    pub max_depth: usize,
    /// Smallest range allowed to fork
    pub min_chunk: usize,
    /// Seed of the input generator
    pub seed: u64,
    /// Sequential wall time in milliseconds
    pub sequential_ms: f64,
    /// Parallel wall time in milliseconds
    pub parallel_ms: f64,
    /// Sequential time over parallel time
    pub speedup: f64,
    /// Fork counters from the parallel run
    pub report: SortReport,
}

/// Half-width of the generated value range.
const INPUT_BOUND: i64 = 1_000_000_000_000;

/// Pseudo-random `i64`s drawn uniformly from `[-10^12, 10^12)`.
pub(crate) fn random_input(size: usize, rng: &mut SampleRng) -> Vec<i64> {
    (0..size)
        .map(|_| rng.gen_range(-INPUT_BOUND..INPUT_BOUND))
        .collect()
}

/// Runs both sorters on the same input and verifies the outputs.
pub fn execute(
    config: &CliConfig,
    size: usize,
    backend: Option<SortBackend>,
    seed: Option<u64>,
) -> Result<SortSummary> {
    let sort_config = config.sort_config(backend)?;
    let mut rng = SampleRng::for_worker(seed, 0);

    let mut sequential = random_input(size, &mut rng);
    let mut parallel = sequential.clone();

    let start = Instant::now();
    sort_all(&mut sequential);
    let sequential_ms = start.elapsed().as_secs_f64() * 1e3;

    let sorter = ParallelSorter::new(sort_config);
    let start = Instant::now();
    let report = sorter.sort_all(&mut parallel)?;
    let parallel_ms = start.elapsed().as_secs_f64() * 1e3;

    if !sequential.windows(2).all(|w| w[0] <= w[1]) {
        return Err(CliError::Verification("sequential output is not sorted".to_string()));
    }
    if let Some(index) = sequential.iter().zip(&parallel).position(|(a, b)| a != b) {
        return Err(CliError::Verification(format!(
            "parallel output differs from sequential at index {}",
            index
        )));
    }

    let speedup = if parallel_ms > 0.0 {
        sequential_ms / parallel_ms
    } else {
        0.0
    };

    Ok(SortSummary {
        size,
        backend: sort_config.backend().to_string(),
        workers: sort_config.workers(),
        max_depth: sort_config.policy().max_depth(),
        min_chunk: sort_config.policy().min_chunk(),
        seed: rng.seed(),
        sequential_ms,
        parallel_ms,
        speedup,
        report,
    })
}

/// Run the sort command
pub fn run(
    config: &CliConfig,
    size: usize,
    backend: Option<&str>,
    seed: Option<u64>,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let backend = backend.map(str::parse::<SortBackend>).transpose()?;

    info!("Starting sort comparison...");
    info!("  Size: {}", size);

    let summary = execute(config, size, backend, seed)?;

    info!(
        sequential_ms = summary.sequential_ms,
        parallel_ms = summary.parallel_ms,
        "Both outputs sorted and identical"
    );

    let rows = [
        ("Elements", summary.size.to_string()),
        ("Backend", summary.backend.clone()),
        ("Workers", summary.workers.to_string()),
        ("Fork depth / min chunk", format!("{} / {}", summary.max_depth, summary.min_chunk)),
        ("Seed", summary.seed.to_string()),
        ("Sequential", format!("{:.3} ms", summary.sequential_ms)),
        ("Parallel", format!("{:.3} ms", summary.parallel_ms)),
        ("Speedup", format!("{:.2}x", summary.speedup)),
        ("Forks", summary.report.forks.to_string()),
        ("Sequential fallbacks", summary.report.sequential_fallbacks.to_string()),
        ("Spawn failures", summary.report.spawn_failures.to_string()),
    ];
    emit(format, &summary, &rows)
}
