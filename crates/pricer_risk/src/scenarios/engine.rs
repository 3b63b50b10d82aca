//! Stress scenario execution.
//!
//! Every position is revalued under every scenario. Each underlying's
//! snapshot is shocked independently, and the volatility the pricer would
//! have used (implied or surface) is resolved first so the shock applies to
//! surface-sourced positions too.

use pricer_core::market_data::{MarketSnapshot, VolatilityInput};
use pricer_core::types::PricingError;
use pricer_pricing::{MonteCarloConfig, OptionPricer, PricingResult};
use tracing::debug;

use super::StressScenario;
use crate::error::RiskError;
use crate::parallel::{try_parallel_map, ParallelConfig};
use crate::portfolio::Position;

/// Seed used for stress revaluation of simulated positions.
pub const DEFAULT_STRESS_SEED: u64 = 0x5EED_0F_57E55;

/// One position with its base pricing and market.
#[derive(Clone, Copy, Debug)]
pub struct StressInput<'a> {
    /// Position held.
    pub position: &'a Position,
    /// Base pricing result supplied by the caller.
    pub result: &'a PricingResult,
    /// Market of the position's underlying.
    pub market: &'a MarketSnapshot,
}

/// Portfolio P&L under one scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StressResult {
    /// Scenario name.
    pub scenario: String,
    /// Portfolio value before the shock.
    pub base_value: f64,
    /// Portfolio value after the shock.
    pub stressed_value: f64,
    /// P&L (stressed − base).
    pub pnl: f64,
    /// P&L relative to gross position value.
    pub pnl_pct: f64,
}

impl StressResult {
    /// Check if P&L is a loss (negative).
    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }
}

/// Severity of the worst scenario loss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StressRating {
    /// Worst loss within the medium threshold.
    #[default]
    Low,
    /// Worst loss above the medium threshold.
    Medium,
    /// Worst loss above the high threshold.
    High,
}

impl StressRating {
    /// Rates a worst loss relative to gross position value.
    pub fn from_loss_ratio(ratio: f64, medium: f64, high: f64) -> Self {
        if ratio > high {
            StressRating::High
        } else if ratio > medium {
            StressRating::Medium
        } else {
            StressRating::Low
        }
    }
}

impl std::fmt::Display for StressRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressRating::Low => write!(f, "LOW"),
            StressRating::Medium => write!(f, "MEDIUM"),
            StressRating::High => write!(f, "HIGH"),
        }
    }
}

/// Results of a full stress battery.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StressReport {
    /// Per-scenario P&L, in battery order.
    pub results: Vec<StressResult>,
    /// Gross position value Σ|q·V| at base.
    pub gross_value: f64,
    /// Rating from the worst loss.
    pub rating: StressRating,
}

impl StressReport {
    /// Scenario with the lowest P&L.
    pub fn worst(&self) -> Option<&StressResult> {
        self.results.iter().min_by(|a, b| a.pnl.total_cmp(&b.pnl))
    }

    /// Scenario VaR: the worst loss as a positive amount, zero if no
    /// scenario loses money.
    pub fn scenario_var(&self) -> f64 {
        self.worst().map_or(0.0, |w| (-w.pnl).max(0.0))
    }
}

/// Runs a stress battery over a book.
#[derive(Clone, Debug)]
pub struct StressEngine {
    scenarios: Vec<StressScenario>,
    monte_carlo: MonteCarloConfig,
    parallel: ParallelConfig,
    medium_threshold: f64,
    high_threshold: f64,
}

impl StressEngine {
    /// Creates an engine with default thresholds (10% / 20%) and a seeded
    /// default simulation configuration.
    pub fn new(scenarios: Vec<StressScenario>) -> Self {
        Self {
            scenarios,
            monte_carlo: MonteCarloConfig::default().with_seed(DEFAULT_STRESS_SEED),
            parallel: ParallelConfig::default(),
            medium_threshold: 0.10,
            high_threshold: 0.20,
        }
    }

    /// Rating thresholds as loss fractions of gross value.
    pub fn with_thresholds(mut self, medium: f64, high: f64) -> Self {
        self.medium_threshold = medium;
        self.high_threshold = high;
        self
    }

    /// Simulation settings for revaluing simulated positions. Without a
    /// seed every revaluation would carry independent noise, so one is
    /// supplied if missing.
    pub fn with_monte_carlo(mut self, config: MonteCarloConfig) -> Self {
        self.monte_carlo = match config.seed() {
            Some(_) => config,
            None => config.with_seed(DEFAULT_STRESS_SEED),
        };
        self
    }

    /// Parallelism settings.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Scenarios in run order.
    pub fn scenarios(&self) -> &[StressScenario] {
        &self.scenarios
    }

    /// Revalues every position under every scenario.
    ///
    /// Deterministic base results are taken as given. Simulated positions
    /// are revalued at base with the stress seed as well, so the scenario
    /// P&L shares random numbers with its base and the noise cancels.
    ///
    /// # Errors
    /// `RiskError::Pricing` if any revaluation fails.
    pub fn run<P: OptionPricer + ?Sized>(
        &self,
        pricer: &P,
        book: &[StressInput<'_>],
    ) -> Result<StressReport, RiskError> {
        debug!(
            positions = book.len(),
            scenarios = self.scenarios.len(),
            "running stress battery"
        );

        let rows = try_parallel_map(book, &self.parallel, |input| self.revalue(pricer, input))?;

        let base_value: f64 = rows.iter().map(|row| row.base).sum();
        let gross_value: f64 = rows.iter().map(|row| row.base.abs()).sum();

        let results: Vec<StressResult> = self
            .scenarios
            .iter()
            .enumerate()
            .map(|(k, scenario)| {
                let stressed_value: f64 = rows.iter().map(|row| row.stressed[k]).sum();
                let pnl = stressed_value - base_value;
                StressResult {
                    scenario: scenario.name.clone(),
                    base_value,
                    stressed_value,
                    pnl,
                    pnl_pct: if gross_value > 0.0 { pnl / gross_value } else { 0.0 },
                }
            })
            .collect();

        let mut report = StressReport {
            results,
            gross_value,
            rating: StressRating::Low,
        };
        if gross_value > 0.0 {
            report.rating = StressRating::from_loss_ratio(
                report.scenario_var() / gross_value,
                self.medium_threshold,
                self.high_threshold,
            );
        }
        Ok(report)
    }

    fn revalue<P: OptionPricer + ?Sized>(
        &self,
        pricer: &P,
        input: &StressInput<'_>,
    ) -> Result<PositionRow, RiskError> {
        let contract = input.position.contract();
        let quantity = input.position.quantity();
        let market = input.market;
        let config = Some(&self.monte_carlo);

        let base_unit = if input.result.is_stochastic() {
            pricer.value(contract, market, config)?
        } else {
            input.result.price
        };
        let volatility = pricer.resolve_volatility(contract, market)?;

        let stressed = self
            .scenarios
            .iter()
            .map(|scenario| -> Result<f64, RiskError> {
                let shocked = shock_market(market, volatility, scenario)?;
                Ok(quantity * pricer.value(contract, &shocked, config)?)
            })
            .collect::<Result<Vec<f64>, RiskError>>()?;

        Ok(PositionRow {
            base: quantity * base_unit,
            stressed,
        })
    }
}

struct PositionRow {
    base: f64,
    stressed: Vec<f64>,
}

/// Applies a scenario to a market, pinning the volatility to an implied
/// value shocked from `volatility`.
pub fn shock_market(
    market: &MarketSnapshot,
    volatility: f64,
    scenario: &StressScenario,
) -> Result<MarketSnapshot, RiskError> {
    let shocked = market
        .with_spot(scenario.shocked_spot(market.spot()))
        .and_then(|m| m.with_rate(scenario.shocked_rate(market.rate())))
        .and_then(|m| m.with_volatility(VolatilityInput::Implied(scenario.shocked_vol(volatility))))
        .map_err(PricingError::from)?;
    Ok(shocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pricer_models::instruments::{OptionContract, OptionType};
    use pricer_pricing::PricingEngine;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    fn market() -> MarketSnapshot {
        MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap()
    }

    fn call_position(quantity: f64) -> Position {
        let contract =
            OptionContract::european("SPX", OptionType::Call, 100.0, now() + Duration::days(180))
                .unwrap();
        Position::new("P1", contract, quantity).unwrap()
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(StressRating::from_loss_ratio(0.05, 0.1, 0.2), StressRating::Low);
        assert_eq!(StressRating::from_loss_ratio(0.1, 0.1, 0.2), StressRating::Low);
        assert_eq!(StressRating::from_loss_ratio(0.15, 0.1, 0.2), StressRating::Medium);
        assert_eq!(StressRating::from_loss_ratio(0.25, 0.1, 0.2), StressRating::High);
        assert!(StressRating::High > StressRating::Medium);
    }

    #[test]
    fn test_shock_market() {
        let scenario = StressScenario::new("Crash", -0.2, 0.5, 0.01);
        let shocked = shock_market(&market(), 0.2, &scenario).unwrap();
        assert_relative_eq!(shocked.spot(), 80.0, epsilon = 1e-12);
        assert_relative_eq!(shocked.rate(), 0.06, epsilon = 1e-12);
        assert_relative_eq!(shocked.implied_vol().unwrap(), 0.3, epsilon = 1e-12);
        assert_eq!(shocked.valuation_time(), now());
    }

    #[test]
    fn test_long_call_loses_on_spot_down() {
        let engine = PricingEngine::new();
        let position = call_position(10.0);
        let market = market();
        let result = engine.price(position.contract(), &market, None).unwrap();

        let stress = StressEngine::new(vec![
            StressScenario::spot("Down", -0.2),
            StressScenario::spot("Up", 0.2),
        ]);
        let report = stress
            .run(
                &engine,
                &[StressInput {
                    position: &position,
                    result: &result,
                    market: &market,
                }],
            )
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert!(report.results[0].is_loss());
        assert!(!report.results[1].is_loss());
        assert_eq!(report.worst().unwrap().scenario, "Down");
        assert_relative_eq!(report.gross_value, 10.0 * result.price, epsilon = 1e-12);
        assert_relative_eq!(report.scenario_var(), -report.results[0].pnl, epsilon = 1e-12);
        // A call losing most of its value under a 20% drop is a high rating.
        assert_eq!(report.rating, StressRating::High);
    }

    #[test]
    fn test_empty_book() {
        let report = StressEngine::new(vec![StressScenario::spot("Down", -0.2)])
            .run(&PricingEngine::new(), &[])
            .unwrap();
        assert_eq!(report.results[0].pnl, 0.0);
        assert_eq!(report.scenario_var(), 0.0);
        assert_eq!(report.rating, StressRating::Low);
    }

    #[test]
    fn test_all_gains_scenario_var_zero() {
        let report = StressReport {
            results: vec![StressResult {
                scenario: "Up".to_string(),
                base_value: 1.0,
                stressed_value: 2.0,
                pnl: 1.0,
                pnl_pct: 1.0,
            }],
            gross_value: 1.0,
            rating: StressRating::Low,
        };
        assert_eq!(report.scenario_var(), 0.0);
    }

    #[test]
    fn test_unseeded_config_gets_stress_seed() {
        let engine = StressEngine::new(Vec::new()).with_monte_carlo(MonteCarloConfig::default());
        assert_eq!(engine.monte_carlo.seed(), Some(DEFAULT_STRESS_SEED));
    }
}
