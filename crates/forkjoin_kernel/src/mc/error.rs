//! Error types for the Monte Carlo integrator.

use thiserror::Error;

/// Errors reported by the integrator.
///
/// A run in which every sample misses the ball is not an error; it
/// estimates 0.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntegrationError {
    /// A sample count of zero leaves the estimator undefined.
    #[error("Invalid sample count 0: at least one sample is required")]
    ZeroSamples,

    /// Sample count above [`MAX_SAMPLES`](super::config::MAX_SAMPLES).
    #[error("Invalid sample count {0}: must not exceed 1_000_000_000")]
    TooManySamples(usize),

    /// A worker panicked while sampling; carries the panic message.
    #[error("Integration worker panicked: {0}")]
    WorkerPanicked(String),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_error_display() {
        let err = IntegrationError::ZeroSamples;
        assert!(err.to_string().contains("Invalid sample count 0"));

        let err = IntegrationError::TooManySamples(2_000_000_000);
        assert!(err.to_string().contains("2000000000"));

        let err = IntegrationError::InvalidConfig {
            name: "samples",
            reason: "must be specified".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'samples': must be specified"
        );
    }
}
