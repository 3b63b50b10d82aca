//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination or value rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file parsed but describes an invalid book or surface.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pricing failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Risk aggregation failed.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<MarketDataError> for CliError {
    fn from(err: MarketDataError) -> Self {
        CliError::InvalidInput(err.to_string())
    }
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        CliError::InvalidInput(err.to_string())
    }
}

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
