//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Contract construction errors.
///
/// All variants surface to callers as `PricingError::InvalidContractTerms`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is not positive and finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Underlying identifier is empty.
    #[error("Underlying identifier must not be empty")]
    EmptyUnderlying,

    /// Barrier level is not positive and finite.
    #[error("Invalid barrier level: {level}")]
    InvalidBarrier {
        /// The invalid barrier level
        level: f64,
    },

    /// Digital payout is not positive and finite.
    #[error("Invalid digital payout: {payout}")]
    InvalidPayout {
        /// The invalid payout amount
        payout: f64,
    },

    /// Averaging observation schedule is malformed.
    #[error("Invalid observation dates: {message}")]
    InvalidObservationDates {
        /// Description of the problem
        message: String,
    },

    /// Exercise style not available for the payoff.
    #[error("Unsupported exercise: {message}")]
    UnsupportedExercise {
        /// Description of the unsupported combination
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidContractTerms(err.to_string())
    }
}
