//! Forkjoin CLI - Command Line Driver for the Fork/Join Kernels
//!
//! This is the operational entry point for the forkjoin kernels.
//!
//! # Commands
//!
//! - `forkjoin sort --size <n>` - Compare sequential and parallel quicksort
//! - `forkjoin integrate --field <name>` - Integrate a field over the unit ball
//! - `forkjoin centre-of-mass --field <name>` - Centroid of a density
//! - `forkjoin check` - Show detected workers and effective configuration
//!
//! # Configuration
//!
//! Settings are read from `forkjoin.toml` (see `--config`), then
//! overridden by `FORKJOIN_WORKERS`, `FORKJOIN_LOG_LEVEL` and
//! `FORKJOIN_SEED`. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::CliConfig;

/// Fork/join quicksort and Monte Carlo integration driver
#[derive(Parser)]
#[command(name = "forkjoin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "forkjoin.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort random data sequentially and in parallel, then compare
    Sort {
        /// Number of elements
        #[arg(short = 'n', long, default_value = "1000000")]
        size: usize,

        /// Parallel backend (work-stealing, scoped-threads)
        #[arg(short, long)]
        backend: Option<String>,

        /// Seed for the input generator
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Integrate a scalar field over the unit ball
    Integrate {
        /// Field (half-space, gaussian, absolute-sum, quadratic)
        #[arg(long)]
        field: Option<String>,

        /// Number of samples drawn from the bounding cube
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Shard the samples across worker threads
        #[arg(short, long)]
        parallel: bool,

        /// Base seed for reproducible estimates
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Estimate the centre of mass of a density over the unit ball
    CentreOfMass {
        /// Density field (half-space, gaussian, absolute-sum, quadratic)
        #[arg(long)]
        field: Option<String>,

        /// Number of samples per integral
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Shard the samples across worker threads
        #[arg(short, long)]
        parallel: bool,

        /// Base seed for reproducible estimates
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check detected parallelism and effective configuration
    Check,
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(Path::new(&cli.config))
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Sort {
            size,
            backend,
            seed,
            format,
        } => commands::sort::run(&config, size, backend.as_deref(), seed, &format)?,
        Commands::Integrate {
            field,
            samples,
            parallel,
            seed,
            format,
        } => commands::integrate::run(&config, field.as_deref(), samples, seed, parallel, &format)?,
        Commands::CentreOfMass {
            field,
            samples,
            parallel,
            seed,
            format,
        } => commands::centre_of_mass::run(
            &config,
            field.as_deref(),
            samples,
            seed,
            parallel,
            &format,
        )?,
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_integrate() {
        let cli = Cli::try_parse_from([
            "forkjoin", "integrate", "--field", "gaussian", "-n", "5000", "--parallel", "-s", "7",
        ])
        .unwrap();

        match cli.command {
            Commands::Integrate {
                field,
                samples,
                parallel,
                seed,
                format,
            } => {
                assert_eq!(field.as_deref(), Some("gaussian"));
                assert_eq!(samples, Some(5000));
                assert!(parallel);
                assert_eq!(seed, Some(7));
                assert_eq!(format, "table");
            }
            _ => panic!("expected integrate"),
        }
        assert_eq!(cli.config, "forkjoin.toml");
    }

    #[test]
    fn test_parse_sort_with_global_flags() {
        let cli = Cli::try_parse_from([
            "forkjoin", "sort", "--size", "100", "--backend", "scoped-threads", "-v", "-c", "alt.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, "alt.toml");
        assert!(matches!(
            cli.command,
            Commands::Sort { size: 100, backend: Some(ref b), .. } if b == "scoped-threads"
        ));
    }

    #[test]
    fn test_parse_centre_of_mass_subcommand_name() {
        let cli = Cli::try_parse_from(["forkjoin", "centre-of-mass", "--field", "half-space"]).unwrap();
        assert!(matches!(cli.command, Commands::CentreOfMass { .. }));
    }
}
