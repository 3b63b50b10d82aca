//! Immutable market inputs for a single pricing call.

use chrono::{DateTime, Utc};

use super::error::MarketDataError;

/// Where the pricer obtains the volatility for a contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolatilityInput {
    /// A single implied volatility (annualised) applied to the contract.
    Implied(f64),
    /// Look the volatility up on the engine's volatility surface at the
    /// contract's strike and tenor.
    Surface,
}

/// Spot, rate and volatility at an evaluation time.
///
/// Value object constructed per call and never mutated; the `with_*`
/// methods return a modified copy, which is how bumped and shocked markets
/// are built.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pricer_core::market_data::{MarketSnapshot, VolatilityInput};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// let base = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now).unwrap();
///
/// let bumped = base.with_spot(101.0).unwrap();
/// assert_eq!(bumped.spot(), 101.0);
/// assert_eq!(base.spot(), 100.0);
///
/// assert!(MarketSnapshot::new(-5.0, 0.05, VolatilityInput::Implied(0.2), now).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketSnapshot {
    spot: f64,
    rate: f64,
    volatility: VolatilityInput,
    valuation_time: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    /// - `MarketDataError::InvalidSpot` if spot is not positive and finite
    /// - `MarketDataError::InvalidRate` if rate is not finite
    /// - `MarketDataError::InvalidVolatility` if an implied volatility is not positive and finite
    pub fn new(
        spot: f64,
        rate: f64,
        volatility: VolatilityInput,
        valuation_time: DateTime<Utc>,
    ) -> Result<Self, MarketDataError> {
        validate_spot(spot)?;
        validate_rate(rate)?;
        validate_volatility(volatility)?;

        Ok(Self {
            spot,
            rate,
            volatility,
            valuation_time,
        })
    }

    /// Snapshot with a flat implied volatility.
    pub fn with_implied_vol(
        spot: f64,
        rate: f64,
        volatility: f64,
        valuation_time: DateTime<Utc>,
    ) -> Result<Self, MarketDataError> {
        Self::new(
            spot,
            rate,
            VolatilityInput::Implied(volatility),
            valuation_time,
        )
    }

    /// Snapshot that defers volatility to the surface.
    pub fn from_surface(
        spot: f64,
        rate: f64,
        valuation_time: DateTime<Utc>,
    ) -> Result<Self, MarketDataError> {
        Self::new(spot, rate, VolatilityInput::Surface, valuation_time)
    }

    /// Spot price of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualised continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility source.
    #[inline]
    pub fn volatility(&self) -> VolatilityInput {
        self.volatility
    }

    /// The implied volatility if supplied directly.
    #[inline]
    pub fn implied_vol(&self) -> Option<f64> {
        match self.volatility {
            VolatilityInput::Implied(vol) => Some(vol),
            VolatilityInput::Surface => None,
        }
    }

    /// Evaluation time.
    #[inline]
    pub fn valuation_time(&self) -> DateTime<Utc> {
        self.valuation_time
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, MarketDataError> {
        validate_spot(spot)?;
        Ok(Self { spot, ..*self })
    }

    /// Copy with a different rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, MarketDataError> {
        validate_rate(rate)?;
        Ok(Self { rate, ..*self })
    }

    /// Copy with a different volatility source.
    pub fn with_volatility(&self, volatility: VolatilityInput) -> Result<Self, MarketDataError> {
        validate_volatility(volatility)?;
        Ok(Self { volatility, ..*self })
    }

    /// Copy at a different evaluation time.
    pub fn with_valuation_time(&self, valuation_time: DateTime<Utc>) -> Self {
        Self {
            valuation_time,
            ..*self
        }
    }
}

fn validate_spot(spot: f64) -> Result<(), MarketDataError> {
    if spot.is_finite() && spot > 0.0 {
        Ok(())
    } else {
        Err(MarketDataError::InvalidSpot { spot })
    }
}

fn validate_rate(rate: f64) -> Result<(), MarketDataError> {
    if rate.is_finite() {
        Ok(())
    } else {
        Err(MarketDataError::InvalidRate { rate })
    }
}

fn validate_volatility(volatility: VolatilityInput) -> Result<(), MarketDataError> {
    match volatility {
        VolatilityInput::Implied(vol) if !(vol.is_finite() && vol > 0.0) => {
            Err(MarketDataError::InvalidVolatility { volatility: vol })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_valid_snapshot() {
        let snap = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        assert_eq!(snap.spot(), 100.0);
        assert_eq!(snap.rate(), 0.05);
        assert_eq!(snap.implied_vol(), Some(0.2));
        assert_eq!(snap.valuation_time(), now());
    }

    #[test]
    fn test_negative_rate_is_allowed() {
        assert!(MarketSnapshot::with_implied_vol(100.0, -0.005, 0.2, now()).is_ok());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert_eq!(
            MarketSnapshot::with_implied_vol(0.0, 0.05, 0.2, now()),
            Err(MarketDataError::InvalidSpot { spot: 0.0 })
        );
        assert!(matches!(
            MarketSnapshot::with_implied_vol(100.0, f64::NAN, 0.2, now()),
            Err(MarketDataError::InvalidRate { .. })
        ));
        assert_eq!(
            MarketSnapshot::with_implied_vol(100.0, 0.05, -0.1, now()),
            Err(MarketDataError::InvalidVolatility { volatility: -0.1 })
        );
    }

    #[test]
    fn test_surface_snapshot_has_no_implied_vol() {
        let snap = MarketSnapshot::from_surface(100.0, 0.05, now()).unwrap();
        assert_eq!(snap.volatility(), VolatilityInput::Surface);
        assert_eq!(snap.implied_vol(), None);
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let base = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let shocked = base
            .with_spot(80.0)
            .and_then(|s| s.with_volatility(VolatilityInput::Implied(0.3)))
            .and_then(|s| s.with_rate(0.06))
            .unwrap();

        assert_eq!(base.spot(), 100.0);
        assert_eq!(shocked.spot(), 80.0);
        assert_eq!(shocked.implied_vol(), Some(0.3));
        assert_eq!(shocked.rate(), 0.06);
        assert!(base.with_spot(-1.0).is_err());
    }
}
