//! Stress scenario definitions and the default battery.
//!
//! Shocks are applied to each underlying's market snapshot independently:
//! spot and volatility shocks are relative, the rate shock is an absolute
//! shift.

use serde::{Deserialize, Serialize};

/// A named market shock.
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::StressScenario;
///
/// let crash = StressScenario::new("Crash", -0.20, 0.50, 0.0);
/// assert_eq!(crash.shocked_spot(100.0), 80.0);
/// assert!((crash.shocked_vol(0.2) - 0.3).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario label reported with the P&L.
    pub name: String,
    /// Relative spot shock (−0.20 = spot down 20%).
    #[serde(default)]
    pub spot_shock: f64,
    /// Relative volatility shock (0.50 = vol up 50%).
    #[serde(default)]
    pub vol_shock: f64,
    /// Absolute rate shift (0.01 = +100bp).
    #[serde(default)]
    pub rate_shift: f64,
}

impl StressScenario {
    /// Creates a scenario.
    pub fn new(name: impl Into<String>, spot_shock: f64, vol_shock: f64, rate_shift: f64) -> Self {
        Self {
            name: name.into(),
            spot_shock,
            vol_shock,
            rate_shift,
        }
    }

    /// Spot-only shock.
    pub fn spot(name: impl Into<String>, shock: f64) -> Self {
        Self::new(name, shock, 0.0, 0.0)
    }

    /// Volatility-only shock.
    pub fn vol(name: impl Into<String>, shock: f64) -> Self {
        Self::new(name, 0.0, shock, 0.0)
    }

    /// Rate-only shift.
    pub fn rate(name: impl Into<String>, shift: f64) -> Self {
        Self::new(name, 0.0, 0.0, shift)
    }

    /// Spot after the shock.
    #[inline]
    pub fn shocked_spot(&self, spot: f64) -> f64 {
        spot * (1.0 + self.spot_shock)
    }

    /// Volatility after the shock.
    #[inline]
    pub fn shocked_vol(&self, vol: f64) -> f64 {
        vol * (1.0 + self.vol_shock)
    }

    /// Rate after the shift.
    #[inline]
    pub fn shocked_rate(&self, rate: f64) -> f64 {
        rate + self.rate_shift
    }

    /// `true` if the shocked spot and volatility stay strictly positive
    /// and all shocks are finite.
    pub fn is_valid(&self) -> bool {
        self.spot_shock.is_finite()
            && self.vol_shock.is_finite()
            && self.rate_shift.is_finite()
            && self.spot_shock > -1.0
            && self.vol_shock > -1.0
            && !self.name.is_empty()
    }
}

/// The fixed battery applied on every aggregation unless disabled.
pub fn default_battery() -> Vec<StressScenario> {
    vec![
        StressScenario::spot("Spot -20%", -0.20),
        StressScenario::spot("Spot -10%", -0.10),
        StressScenario::spot("Spot +10%", 0.10),
        StressScenario::spot("Spot +20%", 0.20),
        StressScenario::vol("Vol +50%", 0.50),
        StressScenario::vol("Vol -30%", -0.30),
        StressScenario::rate("Rate +100bp", 0.01),
        StressScenario::new("Crash", -0.20, 0.50, 0.0),
    ]
}
