//! Implied volatility command implementation

use pricer_core::types::days_to_years;
use pricer_models::analytical::implied_volatility;
use tracing::debug;

use super::OptionTypeArg;
use crate::Result;

/// Solve for the Black-Scholes volatility matching `price`
pub fn solve(
    price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry_days: f64,
    option_type: OptionTypeArg,
) -> Result<f64> {
    let expiry = days_to_years(expiry_days);
    debug!(price, spot, strike, rate, expiry, "solving implied volatility");
    Ok(implied_volatility(price, spot, strike, rate, expiry, option_type.into())?)
}

/// Run the implied-vol command
pub fn run(
    price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry_days: f64,
    option_type: OptionTypeArg,
) -> Result<()> {
    let vol = solve(price, spot, strike, rate, expiry_days, option_type)?;
    println!("{:.6}", vol);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_call_round_trip() {
        // S=K=100, r=5%, σ=20%, T=1y → 10.4506
        let vol = solve(10.4506, 100.0, 100.0, 0.05, 365.25, OptionTypeArg::Call).unwrap();
        assert_relative_eq!(vol, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_arbitrage_price_rejected() {
        assert!(solve(0.01, 100.0, 50.0, 0.05, 365.25, OptionTypeArg::Call).is_err());
    }
}
