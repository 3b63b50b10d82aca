//! Error types for analytical pricing operations.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidTreeSteps`: Lattice with fewer than two steps
/// - `PriceOutOfBounds`: Quoted price violates no-arbitrage bounds
/// - `NumericalInstability`: Computation encountered numerical issues
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry in years
        expiry: f64,
    },

    /// Lattice too coarse.
    #[error("Binomial tree needs at least 2 steps, got {steps}")]
    InvalidTreeSteps {
        /// Requested step count
        steps: usize,
    },

    /// Quoted price outside the arbitrage-free band.
    #[error("Price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// Quoted price
        price: f64,
        /// Lower bound (discounted intrinsic)
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { .. } => PricingError::InsufficientInputs(err.to_string()),
            AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidExpiry { .. }
            | AnalyticalError::PriceOutOfBounds { .. } => {
                PricingError::InvalidContractTerms(err.to_string())
            }
            AnalyticalError::InvalidTreeSteps { .. } => {
                PricingError::SimulationConfigInvalid(err.to_string())
            }
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
