//! Cox-Ross-Rubinstein binomial tree.
//!
//! Prices European and American vanilla options on a recombining lattice:
//! - u = e^(σ√Δt), d = 1/u
//! - p = (e^(rΔt) − d) / (u − d)
//!
//! American exercise compares continuation with intrinsic value at every
//! node. Delta, gamma and theta are read off the first two lattice levels;
//! vega and rho are central differences on re-built trees.

use pricer_core::types::Greeks;

use super::error::AnalyticalError;
use crate::instruments::{ExerciseStyle, OptionType};

/// Default number of lattice steps.
pub const DEFAULT_TREE_STEPS: usize = 200;

/// Relative bump for tree vega.
const VOL_BUMP: f64 = 0.01;

/// Absolute bump for tree rho (1bp).
const RATE_BUMP: f64 = 1e-4;

/// Lattice price plus the node values needed for the spot Greeks.
#[derive(Debug, Clone, Copy)]
struct Lattice {
    price: f64,
    level1: [f64; 2],
    level2: [f64; 3],
    up: f64,
    dt: f64,
}

/// Cox-Ross-Rubinstein tree pricer.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BinomialTree, BlackScholes};
/// use pricer_models::instruments::{ExerciseStyle, OptionType};
///
/// let tree = BinomialTree::new(500).unwrap();
/// let european = tree
///     .price(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Put, ExerciseStyle::European)
///     .unwrap();
/// let american = tree
///     .price(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Put, ExerciseStyle::American)
///     .unwrap();
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap().price_put(100.0, 1.0);
/// assert!((european - bs).abs() < 0.01);
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self {
            steps: DEFAULT_TREE_STEPS,
        }
    }
}

impl BinomialTree {
    /// Creates a tree with `steps` time steps.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidTreeSteps` if `steps < 2`.
    pub fn new(steps: usize) -> Result<Self, AnalyticalError> {
        if steps < 2 {
            return Err(AnalyticalError::InvalidTreeSteps { steps });
        }
        Ok(Self { steps })
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Option value on the lattice.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` / `InvalidVolatility` / `InvalidExpiry` for bad inputs
    /// - `AnalyticalError::NumericalInstability` if the risk-neutral
    ///   probability leaves (0, 1) (rate too large for the step size)
    #[allow(clippy::too_many_arguments)]
    pub fn price(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        option_type: OptionType,
        style: ExerciseStyle,
    ) -> Result<f64, AnalyticalError> {
        self.build(spot, strike, rate, volatility, expiry, option_type, style)
            .map(|lattice| lattice.price)
    }

    /// Greeks in reporting units (theta per day, vega and rho per point).
    #[allow(clippy::too_many_arguments)]
    pub fn greeks(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        option_type: OptionType,
        style: ExerciseStyle,
    ) -> Result<Greeks, AnalyticalError> {
        let lattice = self.build(spot, strike, rate, volatility, expiry, option_type, style)?;

        let u = lattice.up;
        let d = 1.0 / u;
        let delta = (lattice.level1[1] - lattice.level1[0]) / (spot * u - spot * d);

        let [v_dd, v_ud, v_uu] = lattice.level2;
        let (s_uu, s_dd) = (spot * u * u, spot * d * d);
        let upper = (v_uu - v_ud) / (s_uu - spot);
        let lower = (v_ud - v_dd) / (spot - s_dd);
        let gamma = (upper - lower) / (0.5 * (s_uu - s_dd));

        // The middle node two steps on has the starting spot.
        let theta_per_year = (v_ud - lattice.price) / (2.0 * lattice.dt);

        let dv = VOL_BUMP * volatility;
        let v_up = self.price(spot, strike, rate, volatility + dv, expiry, option_type, style)?;
        let v_dn = self.price(spot, strike, rate, volatility - dv, expiry, option_type, style)?;
        let vega = (v_up - v_dn) / (2.0 * dv);

        let r_up = self.price(spot, strike, rate + RATE_BUMP, volatility, expiry, option_type, style)?;
        let r_dn = self.price(spot, strike, rate - RATE_BUMP, volatility, expiry, option_type, style)?;
        let rho = (r_up - r_dn) / (2.0 * RATE_BUMP);

        Ok(Greeks {
            delta,
            gamma,
            theta: theta_per_year / 365.0,
            vega: vega / 100.0,
            rho: rho / 100.0,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        option_type: OptionType,
        style: ExerciseStyle,
    ) -> Result<Lattice, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }

        let n = self.steps;
        let dt = expiry / n as f64;
        let u = (volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = ((rate * dt).exp() - d) / (u - d);
        if !(p > 0.0 && p < 1.0) {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("risk-neutral probability {p} outside (0, 1)"),
            });
        }
        let disc = (-rate * dt).exp();
        let early = style.allows_early_exercise();

        // Node (step, j) has spot S·u^(2j − step).
        let node_spot = |step: usize, j: usize| spot * u.powi(2 * j as i32 - step as i32);

        let mut values: Vec<f64> = (0..=n)
            .map(|j| option_type.intrinsic(node_spot(n, j), strike))
            .collect();
        let mut level1 = [0.0; 2];
        let mut level2 = [0.0; 3];

        for step in (0..n).rev() {
            for j in 0..=step {
                let continuation = disc * (p * values[j + 1] + (1.0 - p) * values[j]);
                values[j] = if early {
                    continuation.max(option_type.intrinsic(node_spot(step, j), strike))
                } else {
                    continuation
                };
            }
            match step {
                2 => level2.copy_from_slice(&values[..3]),
                1 => level1.copy_from_slice(&values[..2]),
                _ => {}
            }
        }

        Ok(Lattice {
            price: values[0],
            level1,
            level2,
            up: u,
            dt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_coarse_tree() {
        assert_eq!(
            BinomialTree::new(1),
            Err(AnalyticalError::InvalidTreeSteps { steps: 1 })
        );
    }

    #[test]
    fn test_european_converges_to_black_scholes() {
        let tree = BinomialTree::new(1000).unwrap();
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let lattice = tree
                .price(100.0, 95.0, 0.05, 0.2, 1.0, option_type, ExerciseStyle::European)
                .unwrap();
            assert_relative_eq!(lattice, bs.price(95.0, 1.0, option_type), epsilon = 2e-2);
        }
    }

    #[test]
    fn test_american_call_without_dividends_equals_european() {
        let tree = BinomialTree::default();
        let eu = tree
            .price(100.0, 100.0, 0.05, 0.3, 0.5, OptionType::Call, ExerciseStyle::European)
            .unwrap();
        let am = tree
            .price(100.0, 100.0, 0.05, 0.3, 0.5, OptionType::Call, ExerciseStyle::American)
            .unwrap();
        assert_relative_eq!(am, eu, epsilon = 1e-10);
    }

    #[test]
    fn test_deep_itm_american_put_is_at_least_intrinsic() {
        let tree = BinomialTree::default();
        let am = tree
            .price(50.0, 100.0, 0.08, 0.2, 1.0, OptionType::Put, ExerciseStyle::American)
            .unwrap();
        assert!(am >= 50.0 - 1e-12);
    }

    #[test]
    fn test_tree_greeks_close_to_analytic_for_european() {
        let tree = BinomialTree::new(800).unwrap();
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        let lattice = tree
            .greeks(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call, ExerciseStyle::European)
            .unwrap();
        let exact = bs.greeks(100.0, 1.0, OptionType::Call);

        assert_relative_eq!(lattice.delta, exact.delta, epsilon = 5e-3);
        assert_relative_eq!(lattice.gamma, exact.gamma, epsilon = 1e-3);
        assert_relative_eq!(lattice.theta, exact.theta, epsilon = 1e-3);
        assert_relative_eq!(lattice.vega, exact.vega, epsilon = 1e-2);
        assert_relative_eq!(lattice.rho, exact.rho, epsilon = 1e-2);
    }

    #[test]
    fn test_invalid_inputs() {
        let tree = BinomialTree::default();
        let r = tree.price(100.0, 100.0, 0.05, 0.2, 0.0, OptionType::Call, ExerciseStyle::European);
        assert!(matches!(r, Err(AnalyticalError::InvalidExpiry { .. })));
        let r = tree.price(100.0, 100.0, 0.05, 0.0, 1.0, OptionType::Call, ExerciseStyle::European);
        assert!(matches!(r, Err(AnalyticalError::InvalidVolatility { .. })));
    }
}
