//! Aggregate risk limits.
//!
//! Limits are reported, never enforced: acting on a breach (margin calls,
//! blocking trades) belongs to the risk-monitoring collaborator.

use std::collections::BTreeMap;
use std::fmt;

use pricer_core::types::Greeks;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Portfolio-level limits on aggregated Greeks and concentration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Maximum absolute portfolio delta.
    pub max_delta: f64,
    /// Maximum absolute portfolio gamma.
    pub max_gamma: f64,
    /// Maximum absolute portfolio vega.
    pub max_vega: f64,
    /// Most negative acceptable portfolio theta (per day).
    pub min_theta: f64,
    /// Maximum share of gross position value in a single underlying.
    pub max_concentration: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_delta: 1000.0,
            max_gamma: 500.0,
            max_vega: 10_000.0,
            min_theta: -5000.0,
            max_concentration: 0.2,
        }
    }
}

/// Quantity a limit applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LimitMetric {
    /// Absolute aggregate delta.
    Delta,
    /// Absolute aggregate gamma.
    Gamma,
    /// Absolute aggregate vega.
    Vega,
    /// Aggregate theta.
    Theta,
    /// Gross value share of one underlying.
    Concentration(String),
}

impl fmt::Display for LimitMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitMetric::Delta => write!(f, "delta"),
            LimitMetric::Gamma => write!(f, "gamma"),
            LimitMetric::Vega => write!(f, "vega"),
            LimitMetric::Theta => write!(f, "theta"),
            LimitMetric::Concentration(underlying) => write!(f, "concentration[{}]", underlying),
        }
    }
}

/// A single limit breach.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LimitBreach {
    /// Breached metric.
    pub metric: LimitMetric,
    /// Observed value.
    pub value: f64,
    /// Configured limit.
    pub limit: f64,
}

impl RiskLimits {
    /// Checks aggregated Greeks and per-underlying concentration shares.
    ///
    /// Concentration is only meaningful across several underlyings, so it is
    /// skipped when `concentration` holds fewer than two entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use pricer_core::types::Greeks;
    /// use pricer_risk::limits::{LimitMetric, RiskLimits};
    ///
    /// let limits = RiskLimits::default();
    /// let greeks = Greeks::new(-1500.0, 10.0, -20.0, 300.0, 5.0);
    /// let breaches = limits.check(&greeks, &BTreeMap::new());
    /// assert_eq!(breaches.len(), 1);
    /// assert_eq!(breaches[0].metric, LimitMetric::Delta);
    /// ```
    pub fn check(&self, greeks: &Greeks, concentration: &BTreeMap<String, f64>) -> Vec<LimitBreach> {
        let mut breaches = Vec::new();

        let mut push = |metric: LimitMetric, value: f64, limit: f64| {
            warn!(metric = %metric, value, limit, "Risk limit breached");
            breaches.push(LimitBreach {
                metric,
                value,
                limit,
            });
        };

        if greeks.delta.abs() > self.max_delta {
            push(LimitMetric::Delta, greeks.delta, self.max_delta);
        }
        if greeks.gamma.abs() > self.max_gamma {
            push(LimitMetric::Gamma, greeks.gamma, self.max_gamma);
        }
        if greeks.vega.abs() > self.max_vega {
            push(LimitMetric::Vega, greeks.vega, self.max_vega);
        }
        if greeks.theta < self.min_theta {
            push(LimitMetric::Theta, greeks.theta, self.min_theta);
        }
        if concentration.len() > 1 {
            for (underlying, share) in concentration {
                if *share > self.max_concentration {
                    push(
                        LimitMetric::Concentration(underlying.clone()),
                        *share,
                        self.max_concentration,
                    );
                }
            }
        }

        breaches
    }

    /// `true` if every limit is usable.
    pub fn is_valid(&self) -> bool {
        self.max_delta >= 0.0
            && self.max_gamma >= 0.0
            && self.max_vega >= 0.0
            && self.min_theta <= 0.0
            && self.max_concentration > 0.0
            && self.max_concentration <= 1.0
    }
}
