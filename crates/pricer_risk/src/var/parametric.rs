//! Delta-vega normal VaR and expected shortfall.

use pricer_models::analytical::{norm_inv_cdf, norm_pdf};

use crate::config::RiskConfig;

/// Horizon of the regulatory-style figures reported whatever the
/// configured horizon.
pub const TEN_DAY_HORIZON: u32 = 10;

/// How multi-day figures are derived from one-day figures.
///
/// Scaling by √h assumes i.i.d. daily P&L with no drift and a static
/// portfolio over the horizon. It is an approximation and is reported as
/// such alongside every scaled figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HorizonScaling {
    /// `h`-day = 1-day × √h.
    SquareRootOfTime,
}

impl HorizonScaling {
    /// Multiplier applied to one-day figures for an `h`-day horizon.
    #[inline]
    pub fn factor(&self, horizon_days: u32) -> f64 {
        match self {
            HorizonScaling::SquareRootOfTime => f64::from(horizon_days).sqrt(),
        }
    }
}

/// First-order portfolio exposures in currency units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskExposure {
    /// Σ q·Δ·S: P&L per unit relative spot move.
    pub dollar_delta: f64,
    /// Σ q·vega·100: P&L per unit absolute volatility move.
    pub dollar_vega: f64,
}

impl RiskExposure {
    /// Exposure of `quantity` units with the given per-unit delta and vega
    /// (vega per volatility point) at `spot`.
    #[inline]
    pub fn of_position(quantity: f64, delta: f64, vega: f64, spot: f64) -> Self {
        Self {
            dollar_delta: quantity * delta * spot,
            dollar_vega: quantity * vega * 100.0,
        }
    }
}

impl std::ops::Add for RiskExposure {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            dollar_delta: self.dollar_delta + rhs.dollar_delta,
            dollar_vega: self.dollar_vega + rhs.dollar_vega,
        }
    }
}

impl std::iter::Sum for RiskExposure {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, e| acc + e)
    }
}

/// Parametric VaR and expected shortfall.
///
/// All figures are positive loss amounts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParametricVar {
    /// Confidence level.
    pub confidence: f64,
    /// Standard deviation of one-day P&L.
    pub sigma_1d: f64,
    /// One-day VaR.
    pub var_1d: f64,
    /// One-day expected shortfall.
    pub es_1d: f64,
    /// Horizon of the scaled figures, in days.
    pub horizon_days: u32,
    /// Scaled VaR over `horizon_days`.
    pub var_horizon: f64,
    /// Scaled expected shortfall over `horizon_days`.
    pub es_horizon: f64,
    /// Scaled ten-day VaR, reported even when `horizon_days` differs.
    pub var_10d: f64,
    /// Scaled ten-day expected shortfall.
    pub es_10d: f64,
    /// Rule used to scale the one-day figures.
    pub scaling: HorizonScaling,
}

/// Computes delta-vega normal VaR.
///
/// Spot and volatility moves are taken as independent; spot moves across
/// underlyings as perfectly correlated.
///
/// ```text
/// σ_P  = √((dollar_delta·σ_spot)² + (dollar_vega·σ_vol)²)
/// VaR₁ = z_c·σ_P
/// ES₁  = σ_P·φ(z_c)/(1 − c)
/// ```
///
/// # Examples
///
/// ```
/// use pricer_risk::config::RiskConfig;
/// use pricer_risk::var::{parametric_var, RiskExposure};
///
/// let exposure = RiskExposure { dollar_delta: 10_000.0, dollar_vega: 0.0 };
/// let var = parametric_var(exposure, &RiskConfig::default());
///
/// // 2% daily move at 99%: 200 × 2.326
/// assert!((var.var_1d - 465.27).abs() < 0.01);
/// assert!((var.var_horizon - var.var_1d * 10f64.sqrt()).abs() < 1e-9);
/// assert!(var.es_1d > var.var_1d);
/// ```
pub fn parametric_var(exposure: RiskExposure, config: &RiskConfig) -> ParametricVar {
    let spot_leg = exposure.dollar_delta * config.spot_daily_vol;
    let vol_leg = exposure.dollar_vega * config.vol_of_vol;
    let sigma_1d = spot_leg.hypot(vol_leg);

    let confidence = config.var_confidence;
    let z = norm_inv_cdf(confidence);
    let var_1d = z * sigma_1d;
    let es_1d = sigma_1d * norm_pdf(z) / (1.0 - confidence);

    let scaling = HorizonScaling::SquareRootOfTime;
    let factor = scaling.factor(config.horizon_days);
    let factor_10d = scaling.factor(TEN_DAY_HORIZON);

    ParametricVar {
        confidence,
        sigma_1d,
        var_1d,
        es_1d,
        horizon_days: config.horizon_days,
        var_horizon: var_1d * factor,
        es_horizon: es_1d * factor,
        var_10d: var_1d * factor_10d,
        es_10d: es_1d * factor_10d,
        scaling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_exposure() {
        let var = parametric_var(RiskExposure::default(), &RiskConfig::default());
        assert_eq!(var.sigma_1d, 0.0);
        assert_eq!(var.var_1d, 0.0);
        assert_eq!(var.es_horizon, 0.0);
    }

    #[test]
    fn test_short_delta_same_var_as_long() {
        let config = RiskConfig::default();
        let long = parametric_var(RiskExposure::of_position(100.0, 0.5, 0.0, 100.0), &config);
        let short = parametric_var(RiskExposure::of_position(-100.0, 0.5, 0.0, 100.0), &config);
        assert_relative_eq!(long.var_1d, short.var_1d, epsilon = 1e-12);
    }

    #[test]
    fn test_vega_leg_combines_in_quadrature() {
        let config = RiskConfig::default();
        // dollar_delta·2% = 300, dollar_vega·1% = 400
        let exposure = RiskExposure {
            dollar_delta: 15_000.0,
            dollar_vega: 40_000.0,
        };
        let var = parametric_var(exposure, &config);
        assert_relative_eq!(var.sigma_1d, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expected_shortfall_at_95() {
        let config = RiskConfig {
            var_confidence: 0.95,
            ..RiskConfig::default()
        };
        let exposure = RiskExposure {
            dollar_delta: 5000.0,
            dollar_vega: 0.0,
        };
        let var = parametric_var(exposure, &config);
        // σ = 100; z = 1.6449; φ(z)/(1 − c) = 2.0627
        assert_relative_eq!(var.var_1d, 164.485, epsilon = 1e-2);
        assert_relative_eq!(var.es_1d, 206.27, epsilon = 1e-2);
    }

    #[test]
    fn test_ten_day_figures_independent_of_horizon() {
        let config = RiskConfig {
            horizon_days: 5,
            ..RiskConfig::default()
        };
        let exposure = RiskExposure {
            dollar_delta: 10_000.0,
            dollar_vega: 0.0,
        };
        let var = parametric_var(exposure, &config);
        assert_eq!(var.horizon_days, 5);
        assert_relative_eq!(var.var_horizon, var.var_1d * 5f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(var.var_10d, var.var_1d * 10f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(var.es_10d, var.es_1d * 10f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_horizon_scaling() {
        assert_relative_eq!(
            HorizonScaling::SquareRootOfTime.factor(10),
            10f64.sqrt(),
            epsilon = 1e-15
        );
        assert_eq!(HorizonScaling::SquareRootOfTime.factor(1), 1.0);
    }

    #[test]
    fn test_exposure_sum() {
        let total: RiskExposure = [
            RiskExposure::of_position(10.0, 0.6, 0.4, 100.0),
            RiskExposure::of_position(-5.0, 0.3, 0.2, 50.0),
        ]
        .into_iter()
        .sum();
        assert_relative_eq!(total.dollar_delta, 600.0 - 75.0, epsilon = 1e-12);
        assert_relative_eq!(total.dollar_vega, 400.0 - 100.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_es_exceeds_var(
            delta in -1e6f64..1e6,
            vega in -1e6f64..1e6,
            confidence in 0.9f64..0.999,
        ) {
            let config = RiskConfig { var_confidence: confidence, ..RiskConfig::default() };
            let var = parametric_var(RiskExposure { dollar_delta: delta, dollar_vega: vega }, &config);
            prop_assert!(var.var_1d >= 0.0);
            prop_assert!(var.es_1d >= var.var_1d);
            prop_assert!(var.var_horizon >= var.var_1d);
        }
    }
}
