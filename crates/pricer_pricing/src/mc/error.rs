//! Error types for Monte Carlo configuration.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the Monte Carlo pricer.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),
    /// Step count outside valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),
    /// Batch count outside valid range [1, 4_096].
    #[error("Invalid batch count {0}: must be in range [1, 4_096]")]
    InvalidBatchCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::SimulationConfigInvalid(err.to_string())
    }
}
