//! Finite-difference bump configuration.

/// Bump sizes for finite-difference Greeks.
///
/// Spot and volatility bumps are relative; the rate bump is relative with
/// an absolute floor so a zero rate still moves; the time bump is relative
/// and capped at half the remaining life.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::GreeksConfig;
///
/// let config = GreeksConfig::default();
/// assert_eq!(config.spot_bump(100.0), 1.0);
/// assert_eq!(config.rate_bump(0.0), 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksConfig {
    /// Relative bump ε.
    pub relative_bump: f64,
    /// Smallest absolute rate bump.
    pub min_rate_bump: f64,
}

impl Default for GreeksConfig {
    fn default() -> Self {
        Self {
            relative_bump: 0.01,
            min_rate_bump: 1e-4,
        }
    }
}

impl GreeksConfig {
    /// Creates a configuration with relative bump `relative_bump`.
    #[inline]
    pub fn with_relative_bump(relative_bump: f64) -> Self {
        Self {
            relative_bump,
            ..Default::default()
        }
    }

    /// ε·S.
    #[inline]
    pub fn spot_bump(&self, spot: f64) -> f64 {
        self.relative_bump * spot
    }

    /// ε·σ.
    #[inline]
    pub fn vol_bump(&self, volatility: f64) -> f64 {
        self.relative_bump * volatility
    }

    /// max(ε·|r|, floor).
    #[inline]
    pub fn rate_bump(&self, rate: f64) -> f64 {
        (self.relative_bump * rate.abs()).max(self.min_rate_bump)
    }

    /// min(ε·T, T/2).
    #[inline]
    pub fn time_bump(&self, maturity: f64) -> f64 {
        (self.relative_bump * maturity).min(0.5 * maturity)
    }

    /// `true` if ε lies in (0, 0.5).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.relative_bump > 0.0
            && self.relative_bump < 0.5
            && self.min_rate_bump > 0.0
            && self.min_rate_bump.is_finite()
    }
}
