//! Market data error types.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data validation and lookup errors.
///
/// # Variants
///
/// - `InvalidSpot`: Non-positive or non-finite spot
/// - `InvalidRate`: Non-finite risk-free rate
/// - `InvalidVolatility`: Non-positive or non-finite implied volatility
/// - `InvalidStrike`: Non-positive strike in a volatility point or query
/// - `InvalidTenor`: Zero tenor in a volatility point, or non-finite query tenor
/// - `NoVolatilityData`: The surface has no points for the underlying
/// - `Interpolation`: Wrapped interpolation error
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid spot price.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid risk-free rate.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid implied volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid tenor.
    #[error("Invalid tenor: {days} days")]
    InvalidTenor {
        /// The invalid tenor in days
        days: f64,
    },

    /// Empty surface for the underlying.
    #[error("No volatility data for underlying '{underlying}'")]
    NoVolatilityData {
        /// Underlying identifier that was queried
        underlying: String,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::InvalidSpot { .. } | MarketDataError::InvalidRate { .. } => {
                PricingError::InsufficientInputs(err.to_string())
            }
            MarketDataError::InvalidVolatility { .. }
            | MarketDataError::InvalidStrike { .. }
            | MarketDataError::InvalidTenor { .. } => {
                PricingError::InvalidContractTerms(err.to_string())
            }
            MarketDataError::NoVolatilityData { underlying } => {
                PricingError::NoVolatilityData { underlying }
            }
            MarketDataError::Interpolation(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
