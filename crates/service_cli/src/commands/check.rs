//! Check command implementation
//!
//! Reports detected hardware parallelism and the effective configuration
//! after file and environment overrides.

use forkjoin_kernel::parallel::available_workers;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &CliConfig, config_path: &str) -> Result<()> {
    info!("Checking configuration...");

    let sort_config = config.sort_config(None)?;
    let effective = toml::to_string_pretty(config)
        .map_err(|e| CliError::InvalidArgument(format!("cannot render configuration: {}", e)))?;

    println!("forkjoin {}", env!("CARGO_PKG_VERSION"));
    println!("  Detected workers:  {}", available_workers());
    println!("  Config file:       {}", config_path);
    println!(
        "  Sort policy:       {} workers, max depth {}, min chunk {}, {}",
        sort_config.workers(),
        sort_config.policy().max_depth(),
        sort_config.policy().min_chunk(),
        sort_config.backend()
    );
    println!("\n# Effective configuration\n{}", effective);

    info!("Configuration OK");
    Ok(())
}
