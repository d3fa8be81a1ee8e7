//! CLI configuration management.
//!
//! Loads `forkjoin.toml` with environment variable overrides. A missing
//! file is not an error: every field has a default.
//!
//! ```toml
//! log_level = "info"
//!
//! [sort]
//! workers = 0            # 0 = available parallelism
//! max_depth = 4
//! min_chunk = 2048
//! backend = "work-stealing"
//!
//! [integrate]
//! workers = 0
//! samples = 1000000
//! field = "half-space"
//! seed = 42
//! ```

use std::path::Path;

use forkjoin_kernel::field::FieldKind;
use forkjoin_kernel::mc::{IntegrationConfig, MAX_SAMPLES};
use forkjoin_kernel::sort::{SortBackend, SortConfig, MAX_FORK_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on configured worker counts.
const MAX_WORKERS: usize = 4096;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parallel sort settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SortSection {
    /// Worker threads; 0 uses available parallelism
    pub workers: usize,
    /// Maximum fork depth; unset derives it from the worker count
    pub max_depth: Option<usize>,
    /// Minimum range length that may fork; unset uses the kernel default
    pub min_chunk: Option<usize>,
    /// Execution backend name
    pub backend: String,
}

impl Default for SortSection {
    fn default() -> Self {
        Self {
            workers: 0,
            max_depth: None,
            min_chunk: None,
            backend: SortBackend::default().to_string(),
        }
    }
}

/// Monte Carlo integration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntegrateSection {
    /// Worker threads for parallel runs; 0 uses available parallelism
    pub workers: usize,
    /// Default sample count
    pub samples: usize,
    /// Default field name
    pub field: String,
    /// Base seed; unset draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for IntegrateSection {
    fn default() -> Self {
        Self {
            workers: 0,
            samples: 1_000_000,
            field: FieldKind::HalfSpace.to_string(),
            seed: None,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: String,

    /// Parallel sort settings
    pub sort: SortSection,

    /// Integration settings
    pub integrate: IntegrateSection,

    /// Environment overrides that failed to parse, reported by `validate`
    #[serde(skip)]
    rejected_overrides: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sort: SortSection::default(),
            integrate: IntegrateSection::default(),
            rejected_overrides: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// `FORKJOIN_WORKERS` sets both worker counts.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = lookup("FORKJOIN_WORKERS") {
            match workers.trim().parse::<usize>() {
                Ok(workers) => {
                    self.sort.workers = workers;
                    self.integrate.workers = workers;
                }
                Err(_) => self
                    .rejected_overrides
                    .push(format!("FORKJOIN_WORKERS '{}' is not a worker count", workers)),
            }
        }

        if let Some(log_level) = lookup("FORKJOIN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(seed) = lookup("FORKJOIN_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => self.integrate.seed = Some(seed),
                Err(_) => self
                    .rejected_overrides
                    .push(format!("FORKJOIN_SEED '{}' is not an unsigned integer", seed)),
            }
        }

        self
    }

    /// Validate the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.rejected_overrides.clone();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        for (section, workers) in [("sort", self.sort.workers), ("integrate", self.integrate.workers)] {
            if workers > MAX_WORKERS {
                errors.push(format!(
                    "{}.workers {} exceeds maximum allowed ({})",
                    section, workers, MAX_WORKERS
                ));
            }
        }

        if let Err(e) = self.sort.backend.parse::<SortBackend>() {
            errors.push(format!("sort.backend: {}", e));
        }

        if let Some(max_depth) = self.sort.max_depth {
            if max_depth > MAX_FORK_DEPTH {
                errors.push(format!(
                    "sort.max_depth {} exceeds maximum allowed ({})",
                    max_depth, MAX_FORK_DEPTH
                ));
            }
        }

        if self.integrate.samples == 0 {
            errors.push("integrate.samples must be greater than 0".to_string());
        }
        if self.integrate.samples > MAX_SAMPLES {
            errors.push(format!(
                "integrate.samples {} exceeds maximum allowed ({})",
                self.integrate.samples, MAX_SAMPLES
            ));
        }

        if let Err(e) = self.integrate.field.parse::<FieldKind>() {
            errors.push(format!("integrate.field: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Kernel sort configuration, with an optional backend override
    pub fn sort_config(&self, backend: Option<SortBackend>) -> crate::Result<SortConfig> {
        let backend = match backend {
            Some(backend) => backend,
            None => self.sort.backend.parse()?,
        };

        let mut builder = SortConfig::builder()
            .workers(self.sort.workers)
            .backend(backend);
        if let Some(max_depth) = self.sort.max_depth {
            builder = builder.max_depth(max_depth);
        }
        if let Some(min_chunk) = self.sort.min_chunk {
            builder = builder.min_chunk(min_chunk);
        }
        Ok(builder.build()?)
    }

    /// Kernel integration configuration.
    ///
    /// Sequential runs use a single worker; command-line values win over
    /// the file.
    pub fn integration_config(
        &self,
        samples: Option<usize>,
        seed: Option<u64>,
        parallel: bool,
    ) -> crate::Result<IntegrationConfig> {
        let workers = if parallel { self.integrate.workers } else { 1 };
        let config = IntegrationConfig::builder()
            .samples(samples.unwrap_or(self.integrate.samples))
            .workers(workers)
            .seed_opt(seed.or(self.integrate.seed))
            .build()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn validation_errors(config: &CliConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.integrate.samples, 1_000_000);
        assert_eq!(config.sort.backend, "work-stealing");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[sort]\nmax_depth = 3\nbackend = \"scoped-threads\"\n\n[integrate]\nseed = 7"
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.sort.max_depth, Some(3));
        assert_eq!(config.sort.backend, "scoped-threads");
        assert_eq!(config.integrate.seed, Some(7));
        assert_eq!(config.integrate.samples, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sort\nworkers = ").unwrap();

        assert!(matches!(CliConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default().with_overrides_from(lookup(&[
            ("FORKJOIN_WORKERS", "3"),
            ("FORKJOIN_LOG_LEVEL", "warn"),
            ("FORKJOIN_SEED", "99"),
        ]));

        assert_eq!(config.sort.workers, 3);
        assert_eq!(config.integrate.workers, 3);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.integrate.seed, Some(99));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_env_override_reported() {
        let config = CliConfig::default().with_overrides_from(lookup(&[
            ("FORKJOIN_WORKERS", "many"),
            ("FORKJOIN_SEED", "-1"),
        ]));

        assert_eq!(config.sort.workers, 0);
        let errors = validation_errors(&config);
        assert!(errors.iter().any(|e| e.contains("FORKJOIN_WORKERS")));
        assert!(errors.iter().any(|e| e.contains("FORKJOIN_SEED")));
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "DEBUG"] {
            let mut config = CliConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.sort.backend = "fibers".to_string();
        config.sort.max_depth = Some(MAX_FORK_DEPTH + 1);
        config.integrate.samples = 0;
        config.integrate.field = "torus".to_string();

        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 5, "{:?}", errors);
        assert!(errors.iter().any(|e| e.contains("log_level")));
        assert!(errors.iter().any(|e| e.contains("sort.backend")));
        assert!(errors.iter().any(|e| e.contains("sort.max_depth")));
        assert!(errors.iter().any(|e| e.contains("integrate.samples")));
        assert!(errors.iter().any(|e| e.contains("integrate.field")));
    }

    #[test]
    fn test_validate_worker_limit() {
        let mut config = CliConfig::default();
        config.integrate.workers = MAX_WORKERS + 1;

        let errors = validation_errors(&config);
        assert!(errors.iter().any(|e| e.contains("integrate.workers")));
    }

    #[test]
    fn test_sort_config_uses_file_and_override() {
        let mut config = CliConfig::default();
        config.sort.workers = 2;
        config.sort.max_depth = Some(3);
        config.sort.min_chunk = Some(64);

        let sort = config.sort_config(None).unwrap();
        assert_eq!(sort.workers(), 2);
        assert_eq!(sort.policy().max_depth(), 3);
        assert_eq!(sort.policy().min_chunk(), 64);
        assert_eq!(sort.backend(), SortBackend::WorkStealing);

        let sort = config.sort_config(Some(SortBackend::ScopedThreads)).unwrap();
        assert_eq!(sort.backend(), SortBackend::ScopedThreads);
    }

    #[test]
    fn test_integration_config_precedence() {
        let mut config = CliConfig::default();
        config.integrate.workers = 3;
        config.integrate.seed = Some(5);

        let sequential = config.integration_config(Some(1_000), None, false).unwrap();
        assert_eq!(sequential.workers(), 1);
        assert_eq!(sequential.samples(), 1_000);
        assert_eq!(sequential.seed(), Some(5));

        let parallel = config.integration_config(None, Some(8), true).unwrap();
        assert_eq!(parallel.workers(), 3);
        assert_eq!(parallel.samples(), 1_000_000);
        assert_eq!(parallel.seed(), Some(8));

        assert!(config.integration_config(Some(0), None, false).is_err());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
