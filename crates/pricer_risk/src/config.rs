//! Risk configuration.
//!
//! Loaded from TOML with every field optional, then overridden from
//! `PRICER_*` environment variables.
//!
//! ```toml
//! var_confidence = 0.975
//! horizon_days = 10
//!
//! [limits]
//! max_delta = 2500.0
//!
//! [[scenarios]]
//! name = "Gap down"
//! spot_shock = -0.35
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::limits::RiskLimits;
use crate::scenarios::{default_battery, StressScenario};

/// Environment variable overriding [`RiskConfig::var_confidence`].
pub const ENV_VAR_CONFIDENCE: &str = "PRICER_VAR_CONFIDENCE";
/// Environment variable overriding [`RiskConfig::spot_daily_vol`].
pub const ENV_SPOT_DAILY_VOL: &str = "PRICER_SPOT_DAILY_VOL";
/// Environment variable overriding [`RiskConfig::vol_of_vol`].
pub const ENV_VOL_OF_VOL: &str = "PRICER_VOL_OF_VOL";

/// Parameters of the portfolio risk aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// One-sided VaR confidence level in (0.5, 1).
    pub var_confidence: f64,
    /// Assumed one-day relative spot volatility.
    pub spot_daily_vol: f64,
    /// Assumed one-day volatility move, in absolute vol units.
    pub vol_of_vol: f64,
    /// Horizon for the scaled VaR figures, in trading days.
    pub horizon_days: u32,
    /// Worst-loss share of gross value above which the rating is Medium.
    pub stress_medium_threshold: f64,
    /// Worst-loss share of gross value above which the rating is High.
    pub stress_high_threshold: f64,
    /// Aggregate limits.
    pub limits: RiskLimits,
    /// Whether the built-in stress battery runs.
    pub include_default_scenarios: bool,
    /// Additional scenarios, run after the built-in battery.
    pub scenarios: Vec<StressScenario>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            var_confidence: 0.99,
            spot_daily_vol: 0.02,
            vol_of_vol: 0.01,
            horizon_days: 10,
            stress_medium_threshold: 0.10,
            stress_high_threshold: 0.20,
            limits: RiskLimits::default(),
            include_default_scenarios: true,
            scenarios: Vec::new(),
        }
    }
}

impl RiskConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, RiskError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| RiskError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RiskError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RiskError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies `PRICER_*` environment overrides and revalidates.
    pub fn apply_env_overrides(self) -> Result<Self, RiskError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup and revalidates.
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self, RiskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Result<Option<f64>, RiskError> {
            lookup(key)
                .map(|raw| {
                    raw.trim().parse::<f64>().map_err(|_| {
                        RiskError::InvalidConfig(format!("{} is not a number: {}", key, raw))
                    })
                })
                .transpose()
        };

        if let Some(confidence) = parse(ENV_VAR_CONFIDENCE)? {
            self.var_confidence = confidence;
        }
        if let Some(vol) = parse(ENV_SPOT_DAILY_VOL)? {
            self.spot_daily_vol = vol;
        }
        if let Some(vol_of_vol) = parse(ENV_VOL_OF_VOL)? {
            self.vol_of_vol = vol_of_vol;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), RiskError> {
        if !(self.var_confidence > 0.5 && self.var_confidence < 1.0) {
            return Err(RiskError::InvalidConfig(format!(
                "var_confidence must lie in (0.5, 1), got {}",
                self.var_confidence
            )));
        }
        if !(self.spot_daily_vol.is_finite() && self.spot_daily_vol >= 0.0) {
            return Err(RiskError::InvalidConfig(format!(
                "spot_daily_vol must be non-negative, got {}",
                self.spot_daily_vol
            )));
        }
        if !(self.vol_of_vol.is_finite() && self.vol_of_vol >= 0.0) {
            return Err(RiskError::InvalidConfig(format!(
                "vol_of_vol must be non-negative, got {}",
                self.vol_of_vol
            )));
        }
        if self.horizon_days == 0 {
            return Err(RiskError::InvalidConfig(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if !(self.stress_medium_threshold > 0.0
            && self.stress_medium_threshold <= self.stress_high_threshold)
        {
            return Err(RiskError::InvalidConfig(format!(
                "stress thresholds must satisfy 0 < medium <= high, got {} / {}",
                self.stress_medium_threshold, self.stress_high_threshold
            )));
        }
        if !self.limits.is_valid() {
            return Err(RiskError::InvalidConfig("invalid risk limits".to_string()));
        }
        if let Some(bad) = self.scenarios.iter().find(|s| !s.is_valid()) {
            return Err(RiskError::InvalidConfig(format!(
                "invalid stress scenario '{}'",
                bad.name
            )));
        }
        Ok(())
    }

    /// Scenarios run on each aggregation, built-in battery first.
    pub fn stress_scenarios(&self) -> Vec<StressScenario> {
        let mut scenarios = if self.include_default_scenarios {
            default_battery()
        } else {
            Vec::new()
        };
        scenarios.extend(self.scenarios.iter().cloned());
        scenarios
    }
}
