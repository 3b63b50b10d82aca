//! A single implied-volatility observation.

use crate::market_data::MarketDataError;

/// Implied volatility observed for one (underlying, strike, tenor) node.
///
/// The composite key is `(underlying, strike, tenor_days)`; upserting a
/// point with the same key overwrites the stored volatility.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::VolatilityPoint;
///
/// let point = VolatilityPoint::new("ETH", 3000.0, 30, 0.65).unwrap();
/// assert_eq!(point.tenor_days(), 30);
///
/// assert!(VolatilityPoint::new("ETH", 0.0, 30, 0.65).is_err());
/// assert!(VolatilityPoint::new("ETH", 3000.0, 0, 0.65).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VolatilityPoint {
    underlying: String,
    strike: f64,
    tenor_days: u32,
    implied_vol: f64,
}

impl VolatilityPoint {
    /// Creates a validated observation.
    ///
    /// # Errors
    /// - `MarketDataError::InvalidStrike` if strike is not positive and finite
    /// - `MarketDataError::InvalidTenor` if `tenor_days` is zero
    /// - `MarketDataError::InvalidVolatility` if the volatility is not positive and finite
    pub fn new(
        underlying: impl Into<String>,
        strike: f64,
        tenor_days: u32,
        implied_vol: f64,
    ) -> Result<Self, MarketDataError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(MarketDataError::InvalidStrike { strike });
        }
        if tenor_days == 0 {
            return Err(MarketDataError::InvalidTenor { days: 0.0 });
        }
        if !(implied_vol.is_finite() && implied_vol > 0.0) {
            return Err(MarketDataError::InvalidVolatility {
                volatility: implied_vol,
            });
        }

        Ok(Self {
            underlying: underlying.into(),
            strike,
            tenor_days,
            implied_vol,
        })
    }

    /// Underlying identifier.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Strike of the node.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Days to expiry of the node.
    #[inline]
    pub fn tenor_days(&self) -> u32 {
        self.tenor_days
    }

    /// Annualised implied volatility.
    #[inline]
    pub fn implied_vol(&self) -> f64 {
        self.implied_vol
    }
}
