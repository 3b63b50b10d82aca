//! Signed holdings of option contracts.

use pricer_models::instruments::OptionContract;

use super::PositionId;
use crate::error::RiskError;

/// A signed quantity of one option contract.
///
/// Positive quantities are long, negative short.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_risk::portfolio::Position;
///
/// let expiry = Utc.with_ymd_and_hms(2027, 1, 15, 0, 0, 0).unwrap();
/// let call = OptionContract::european("AAPL", OptionType::Call, 200.0, expiry).unwrap();
/// let short = Position::new("P1", call, -10.0).unwrap();
/// assert!(short.is_short());
/// assert_eq!(short.underlying(), "AAPL");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    id: PositionId,
    contract: OptionContract,
    quantity: f64,
}

impl Position {
    /// Creates a position.
    ///
    /// # Errors
    /// `RiskError::InvalidQuantity` if `quantity` is not finite.
    pub fn new(
        id: impl Into<PositionId>,
        contract: OptionContract,
        quantity: f64,
    ) -> Result<Self, RiskError> {
        let id = id.into();
        if !quantity.is_finite() {
            return Err(RiskError::InvalidQuantity {
                position: id.to_string(),
                quantity,
            });
        }
        Ok(Self {
            id,
            contract,
            quantity,
        })
    }

    /// Position identifier.
    #[inline]
    pub fn id(&self) -> &PositionId {
        &self.id
    }

    /// Contract held.
    #[inline]
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Signed quantity.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Underlying of the contract held.
    #[inline]
    pub fn underlying(&self) -> &str {
        self.contract.underlying()
    }

    /// `true` for a short position.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }
}
