//! Risk error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised while aggregating portfolio risk.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// A position could not be (re)priced.
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// No market snapshot was supplied for an underlying held in the portfolio.
    #[error("No market snapshot for underlying {underlying}")]
    MissingMarket {
        /// Underlying identifier.
        underlying: String,
    },

    /// Aggregation was asked for a portfolio with no positions.
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// A position quantity is not finite.
    #[error("Invalid quantity {quantity} for position {position}")]
    InvalidQuantity {
        /// Position identifier.
        position: String,
        /// Offending quantity.
        quantity: f64,
    },

    /// Configuration could not be read or failed validation.
    #[error("Invalid risk configuration: {0}")]
    InvalidConfig(String),
}
