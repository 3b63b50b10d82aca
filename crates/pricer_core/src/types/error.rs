//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The caller-facing taxonomy for every pricing call
//! - `InterpolationError`: Errors from interpolation helpers
//! - `SolverError`: Errors from root-finding solvers
//!
//! Every failure is scoped to one pricing or aggregation call; none of
//! these conditions is retried internally.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `ContractExpired`: Time to expiry is not strictly positive
/// - `InvalidContractTerms`: Non-positive strike or volatility, malformed barrier or averaging setup
/// - `NoVolatilityData`: The volatility surface holds no points for the underlying
/// - `SimulationConfigInvalid`: Non-positive path or step count
/// - `InsufficientInputs`: A required market input is missing
/// - `NumericalInstability`: A computation produced a non-finite figure
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidContractTerms("strike must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid contract terms: strike must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Expiry is at or before the valuation time.
    #[error("Contract expired: expiry {expiry} is not after valuation time {valuation}")]
    ContractExpired {
        /// Contract expiry timestamp
        expiry: DateTime<Utc>,
        /// Valuation timestamp of the snapshot
        valuation: DateTime<Utc>,
    },

    /// Contract terms cannot be priced.
    #[error("Invalid contract terms: {0}")]
    InvalidContractTerms(String),

    /// No implied volatility is stored for the underlying.
    #[error("No volatility data for underlying '{underlying}'")]
    NoVolatilityData {
        /// Underlying identifier that was queried
        underlying: String,
    },

    /// Monte Carlo configuration rejected.
    #[error("Invalid simulation config: {0}")]
    SimulationConfigInvalid(String),

    /// A required input was not supplied.
    #[error("Insufficient inputs: {0}")]
    InsufficientInputs(String),

    /// Computation produced a non-finite result.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Returns `true` for the expired-contract failure.
    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self, PricingError::ContractExpired { .. })
    }
}

/// Interpolation errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::InsufficientData { got: 0, need: 1 };
/// assert!(format!("{}", err).contains("need at least 1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Not enough knots to interpolate.
    #[error("Insufficient data: need at least {need} points, got {got}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum required points
        need: usize,
    },

    /// Knot abscissae are not strictly increasing.
    #[error("Knots must be strictly increasing")]
    UnsortedKnots,

    /// Abscissae and ordinates differ in length.
    #[error("Length mismatch: {xs} abscissae, {ys} ordinates")]
    LengthMismatch {
        /// Number of abscissae
        xs: usize,
        /// Number of ordinates
        ys: usize,
    },
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expired_display_names_both_timestamps() {
        let expiry = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let valuation = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let err = PricingError::ContractExpired { expiry, valuation };

        let msg = err.to_string();
        assert!(msg.contains("2024-01-01"));
        assert!(msg.contains("2024-06-01"));
        assert!(err.is_expired());
    }

    #[test]
    fn test_no_volatility_data_display() {
        let err = PricingError::NoVolatilityData {
            underlying: "ETH".to_string(),
        };
        assert_eq!(err.to_string(), "No volatility data for underlying 'ETH'");
        assert!(!err.is_expired());
    }

    #[test]
    fn test_solver_error_converts_to_numerical_instability() {
        let err: PricingError = SolverError::NoBracket { a: 0.0, b: 1.0 }.into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
