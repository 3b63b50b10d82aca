//! Value-at-Risk.
//!
//! Two measures are reported side by side:
//!
//! - **Parametric**: normal portfolio P&L with standard deviation implied by
//!   aggregated dollar delta and dollar vega ([`parametric_var`]).
//! - **Scenario**: the worst loss across the stress battery
//!   ([`crate::scenarios::StressReport::scenario_var`]).

mod parametric;

pub use parametric::{
    parametric_var, HorizonScaling, ParametricVar, RiskExposure, TEN_DAY_HORIZON,
};
