//! Tests for finite-difference Greeks and result types.

use super::*;
use crate::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer};
use crate::path_dependent::PathPayoff;
use approx::assert_relative_eq;
use pricer_core::types::{Greeks, PricingError};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{BarrierDirection, OptionType};

fn pricer(n_paths: usize, n_steps: usize) -> MonteCarloPricer {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .build()
        .unwrap();
    MonteCarloPricer::new(config).unwrap()
}

// =============================================================================
// GreeksConfig
// =============================================================================

#[test]
fn test_bump_sizes() {
    let config = GreeksConfig::default();
    assert_relative_eq!(config.spot_bump(250.0), 2.5);
    assert_relative_eq!(config.vol_bump(0.3), 0.003);
    assert_relative_eq!(config.rate_bump(0.05), 1e-4);
    assert_relative_eq!(config.rate_bump(-0.2), 0.002);
    assert_relative_eq!(config.time_bump(2.0), 0.02);
    assert_relative_eq!(
        GreeksConfig::with_relative_bump(0.4).time_bump(1.0),
        0.4
    );
}

#[test]
fn test_invalid_bump_rejected() {
    let mc = pricer(100, 1);
    let payoff = PathPayoff::vanilla(OptionType::Call, 100.0, 1);
    let config = GreeksConfig::with_relative_bump(0.0);
    let err = finite_difference_greeks(&mc, GbmParams::default(), &payoff, 1, &config).unwrap_err();
    assert!(matches!(err, PricingError::SimulationConfigInvalid(_)));
}

// =============================================================================
// Finite differences against the closed form
// =============================================================================

#[test]
fn test_vanilla_call_greeks_match_black_scholes() {
    let mc = pricer(100_000, 1);
    let payoff = PathPayoff::vanilla(OptionType::Call, 100.0, 1);
    let fd = finite_difference_greeks(
        &mc,
        GbmParams::default(),
        &payoff,
        17,
        &GreeksConfig::default(),
    )
    .unwrap();
    let exact = BlackScholes::new(100.0, 0.05, 0.2)
        .unwrap()
        .greeks(100.0, 1.0, OptionType::Call);

    assert!((fd.greeks.delta - exact.delta).abs() < 0.01);
    assert!((fd.greeks.gamma - exact.gamma).abs() < 0.003);
    assert!((fd.greeks.vega - exact.vega).abs() < 0.01);
    assert!((fd.greeks.rho - exact.rho).abs() < 0.01);
    assert!((fd.greeks.theta - exact.theta).abs() < 1e-3);
}

#[test]
fn test_vanilla_put_delta_sign() {
    let mc = pricer(50_000, 1);
    let payoff = PathPayoff::vanilla(OptionType::Put, 100.0, 1);
    let fd = finite_difference_greeks(
        &mc,
        GbmParams::default(),
        &payoff,
        3,
        &GreeksConfig::default(),
    )
    .unwrap();
    assert!(fd.greeks.delta < 0.0 && fd.greeks.delta > -1.0);
    assert!(fd.greeks.gamma > 0.0);
}

#[test]
fn test_noise_is_reported_and_scaled() {
    let mc = pricer(20_000, 12);
    let payoff = PathPayoff::barrier(OptionType::Call, 100.0, 120.0, BarrierDirection::UpOut, 12);
    let params = GbmParams::default();
    let fd = finite_difference_greeks(&mc, params, &payoff, 8, &GreeksConfig::default()).unwrap();

    let se = fd.estimate.std_error;
    assert!(se > 0.0);
    assert_relative_eq!(
        fd.std_error.delta,
        std::f64::consts::SQRT_2 * se / 2.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(fd.std_error.gamma, 6.0_f64.sqrt() * se, epsilon = 1e-12);
    assert!(fd.std_error.vega > 0.0);
    assert!(fd.std_error.theta > 0.0);
    assert!(fd.std_error.rho > 0.0);
}

#[test]
fn test_common_random_numbers_are_reproducible() {
    let mc = pricer(5_000, 10);
    let payoff = PathPayoff::barrier(OptionType::Put, 100.0, 85.0, BarrierDirection::DownIn, 10);
    let run = || {
        finite_difference_greeks(&mc, GbmParams::default(), &payoff, 77, &GreeksConfig::default())
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.greeks, b.greeks);
    assert_eq!(a.estimate, b.estimate);
}

// =============================================================================
// PricingResult
// =============================================================================

#[test]
fn test_pricing_result_confidence() {
    let result = PricingResult {
        price: 5.0,
        greeks: Greeks::zero(),
        std_error: Some(0.1),
        greeks_std_error: Some(Greeks::zero()),
        method: PricingMethod::MonteCarlo,
    };
    assert!(result.is_stochastic());
    assert_relative_eq!(result.confidence_95(), 0.196);
    assert_relative_eq!(result.confidence_99(), 0.2576);

    let analytic = PricingResult::deterministic(5.0, Greeks::zero(), PricingMethod::Analytic);
    assert!(!analytic.is_stochastic());
    assert_eq!(analytic.confidence_99(), 0.0);
}
