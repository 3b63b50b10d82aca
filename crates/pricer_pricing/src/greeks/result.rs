//! Pricing result type.
//!
//! Provides [`PricingResult`], the fair value and five Greeks for one
//! (contract, snapshot) pair, with the Monte Carlo noise attached when the
//! value came from simulation.

use pricer_core::types::Greeks;

/// Method that produced a [`PricingResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingMethod {
    /// Black-Scholes closed form.
    Analytic,
    /// Cox-Ross-Rubinstein lattice.
    BinomialTree,
    /// Monte Carlo simulation with finite-difference Greeks.
    MonteCarlo,
}

/// Fair value and sensitivities.
///
/// Greeks are in reporting units: theta per calendar day, vega per
/// volatility point, rho per rate point.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::Greeks;
/// use pricer_pricing::greeks::{PricingMethod, PricingResult};
///
/// let result = PricingResult::deterministic(
///     10.45,
///     Greeks::new(0.64, 0.019, -0.018, 0.375, 0.532),
///     PricingMethod::Analytic,
/// );
/// assert_eq!(result.confidence_95(), 0.0);
/// assert!(result.greeks_std_error.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value of one unit of the contract.
    pub price: f64,
    /// Delta, gamma, theta, vega and rho.
    pub greeks: Greeks,
    /// Standard error of `price`; `None` for deterministic methods.
    pub std_error: Option<f64>,
    /// Per-Greek noise bound; `None` for deterministic methods.
    pub greeks_std_error: Option<Greeks>,
    /// How the value was produced.
    pub method: PricingMethod,
}

impl PricingResult {
    /// Result of a deterministic method.
    #[inline]
    pub fn deterministic(price: f64, greeks: Greeks, method: PricingMethod) -> Self {
        Self {
            price,
            greeks,
            std_error: None,
            greeks_std_error: None,
            method,
        }
    }

    /// Half-width of the 95% confidence interval on the price.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error.unwrap_or(0.0)
    }

    /// Half-width of the 99% confidence interval on the price.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error.unwrap_or(0.0)
    }

    /// `true` if the value carries simulation noise.
    #[inline]
    pub fn is_stochastic(&self) -> bool {
        self.std_error.is_some()
    }
}
