//! Black-Scholes implied volatility.

use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};

use super::{AnalyticalError, BlackScholes};
use crate::instruments::OptionType;

const INITIAL_GUESS: f64 = 0.2;
const NEWTON_FLOOR: f64 = 0.01;
const BRACKET: (f64, f64) = (1e-4, 5.0);
const TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

/// Volatility that reproduces `market_price` under Black-Scholes.
///
/// Newton-Raphson on vega from σ = 0.2, floored at 0.01. When Newton stalls
/// (vanishing vega deep in or out of the money) Brent takes over on
/// [1e-4, 5.0].
///
/// # Errors
/// - `AnalyticalError::InvalidSpot` / `InvalidExpiry` for bad inputs
/// - `AnalyticalError::PriceOutOfBounds` if the price breaks no-arbitrage bounds
/// - `AnalyticalError::NumericalInstability` if neither solver converges
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_volatility, BlackScholes};
/// use pricer_models::instruments::OptionType;
///
/// let price = BlackScholes::new(100.0, 0.05, 0.25).unwrap().price_call(110.0, 0.5);
/// let vol = implied_volatility(price, 100.0, 110.0, 0.05, 0.5, OptionType::Call).unwrap();
/// assert!((vol - 0.25).abs() < 1e-5);
/// ```
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    option_type: OptionType,
) -> Result<f64, AnalyticalError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(AnalyticalError::InvalidSpot { spot });
    }
    if !(expiry.is_finite() && expiry > 0.0) {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }

    let df = (-rate * expiry).exp();
    let (lower, upper) = match option_type {
        OptionType::Call => ((spot - strike * df).max(0.0), spot),
        OptionType::Put => ((strike * df - spot).max(0.0), strike * df),
    };
    if !(market_price.is_finite() && market_price > lower && market_price < upper) {
        return Err(AnalyticalError::PriceOutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }

    let model_price = |sigma: f64| -> f64 {
        BlackScholes::new(spot, rate, sigma)
            .map(|bs| bs.price(strike, expiry, option_type))
            .unwrap_or(f64::NAN)
    };
    let objective = |sigma: f64| model_price(sigma) - market_price;
    let vega = |sigma: f64| -> f64 {
        BlackScholes::new(spot, rate, sigma)
            .map(|bs| bs.vega(strike, expiry))
            .unwrap_or(f64::NAN)
    };

    let config = SolverConfig::new(TOLERANCE, MAX_ITERATIONS);
    let newton = NewtonRaphsonSolver::new(config).with_floor(NEWTON_FLOOR);
    if let Ok(sigma) = newton.find_root(objective, vega, INITIAL_GUESS) {
        return Ok(sigma);
    }

    BrentSolver::new(config)
        .find_root(objective, BRACKET.0, BRACKET.1)
        .map_err(|err| AnalyticalError::NumericalInstability {
            message: format!("implied volatility did not converge: {err}"),
        })
}
