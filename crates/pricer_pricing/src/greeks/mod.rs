//! Greeks for simulated payoffs.
//!
//! Closed-form Greeks live with the analytic models in `pricer_models`;
//! this module covers payoffs that are only reachable by simulation, plus
//! the [`PricingResult`] returned by every pricing route.

mod config;
mod finite_difference;
mod result;

pub use config::GreeksConfig;
pub use finite_difference::{finite_difference_greeks, FdGreeks};
pub use result::{PricingMethod, PricingResult};

#[cfg(test)]
mod tests;
