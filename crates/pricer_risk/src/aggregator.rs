//! Portfolio risk aggregation.
//!
//! [`RiskAggregator::aggregate`] turns a set of (position, pricing result)
//! pairs into a [`PortfolioRiskSnapshot`]:
//!
//! 1. Greeks and values summed with signed quantities
//! 2. Parametric VaR and expected shortfall from dollar delta and vega
//! 3. Stress battery revaluation and scenario VaR
//! 4. Limit checks
//!
//! Multi-day VaR is scaled from one day by √h. That is an approximation
//! ([`HorizonScaling::SquareRootOfTime`]) and is flagged on the snapshot.

use std::collections::{BTreeMap, HashMap};

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::Greeks;
use pricer_pricing::{MonteCarloConfig, OptionPricer, PricingResult};
use tracing::{debug, info};

use crate::config::RiskConfig;
use crate::error::RiskError;
use crate::limits::LimitBreach;
use crate::parallel::{try_parallel_map, ParallelConfig};
use crate::portfolio::Position;
use crate::scenarios::{StressEngine, StressInput, StressRating, StressReport, StressResult};
use crate::var::{parametric_var, HorizonScaling, ParametricVar, RiskExposure};

/// Portfolio-level risk derived from one aggregation call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortfolioRiskSnapshot {
    /// Number of positions aggregated.
    pub position_count: usize,
    /// Signed-quantity-weighted sum of position Greeks.
    pub greeks: Greeks,
    /// Upper bound on the Monte Carlo noise in `greeks` (Σ|q|·se), if any
    /// position was simulated.
    pub greeks_std_error: Option<Greeks>,
    /// Σ q·V.
    pub net_value: f64,
    /// Σ |q·V|.
    pub gross_value: f64,
    /// Upper bound on the Monte Carlo noise in `net_value`, if any.
    pub value_std_error: Option<f64>,
    /// Dollar delta and dollar vega.
    pub exposure: RiskExposure,
    /// Share of gross value per underlying.
    pub concentration: BTreeMap<String, f64>,
    /// Parametric VaR and expected shortfall.
    pub parametric: ParametricVar,
    /// Stress battery results.
    pub stress: StressReport,
    /// Worst stress loss as a positive amount.
    pub scenario_var: f64,
    /// Limits breached by this portfolio.
    pub limit_breaches: Vec<LimitBreach>,
}

impl PortfolioRiskSnapshot {
    /// One-day parametric VaR.
    #[inline]
    pub fn var_1d(&self) -> f64 {
        self.parametric.var_1d
    }

    /// Parametric VaR over the configured horizon (10 days by default),
    /// scaled from one day by [`Self::horizon_scaling`].
    #[inline]
    pub fn var_horizon(&self) -> f64 {
        self.parametric.var_horizon
    }

    /// Ten-day parametric VaR, scaled from one day. Reported alongside
    /// [`Self::var_horizon`] when the configured horizon is not ten days.
    #[inline]
    pub fn var_10d(&self) -> f64 {
        self.parametric.var_10d
    }

    /// Ten-day expected shortfall, scaled from one day.
    #[inline]
    pub fn expected_shortfall_10d(&self) -> f64 {
        self.parametric.es_10d
    }

    /// One-day expected shortfall.
    #[inline]
    pub fn expected_shortfall_1d(&self) -> f64 {
        self.parametric.es_1d
    }

    /// Expected shortfall over the configured horizon.
    #[inline]
    pub fn expected_shortfall_horizon(&self) -> f64 {
        self.parametric.es_horizon
    }

    /// Rule used to derive the horizon figures.
    #[inline]
    pub fn horizon_scaling(&self) -> HorizonScaling {
        self.parametric.scaling
    }

    /// Scenario with the worst P&L.
    pub fn worst_scenario(&self) -> Option<&StressResult> {
        self.stress.worst()
    }

    /// Stress rating from the worst scenario.
    #[inline]
    pub fn rating(&self) -> StressRating {
        self.stress.rating
    }
}

/// Aggregates position-level pricing into portfolio risk.
///
/// Holds the pricer used for stress revaluation and one market snapshot
/// per underlying.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::{OptionPricer, PricingEngine};
/// use pricer_risk::{Position, RiskAggregator, RiskConfig};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
/// let market = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now).unwrap();
/// let expiry = now + Duration::days(90);
///
/// let call = OptionContract::european("SPX", OptionType::Call, 100.0, expiry).unwrap();
/// let put = OptionContract::european("SPX", OptionType::Put, 95.0, expiry).unwrap();
///
/// let engine = PricingEngine::new();
/// let book = vec![
///     (Position::new("C1", call.clone(), 10.0).unwrap(), engine.price(&call, &market, None).unwrap()),
///     (Position::new("P1", put.clone(), -5.0).unwrap(), engine.price(&put, &market, None).unwrap()),
/// ];
///
/// let aggregator = RiskAggregator::new(engine, RiskConfig::default())
///     .unwrap()
///     .with_market("SPX", market);
/// let risk = aggregator.aggregate(&book).unwrap();
///
/// assert!(risk.greeks.delta > 0.0);
/// assert!(risk.var_horizon() > risk.var_1d());
/// assert_eq!(risk.stress.results.len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct RiskAggregator<P> {
    pricer: P,
    markets: HashMap<String, MarketSnapshot>,
    config: RiskConfig,
    stress: StressEngine,
    parallel: ParallelConfig,
}

impl<P: OptionPricer> RiskAggregator<P> {
    /// Creates an aggregator with no markets.
    ///
    /// # Errors
    /// `RiskError::InvalidConfig` if `config` fails validation.
    pub fn new(pricer: P, config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        let stress = StressEngine::new(config.stress_scenarios())
            .with_thresholds(config.stress_medium_threshold, config.stress_high_threshold);
        Ok(Self {
            pricer,
            markets: HashMap::new(),
            config,
            stress,
            parallel: ParallelConfig::default(),
        })
    }

    /// Registers the market for an underlying, replacing any previous one.
    pub fn with_market(mut self, underlying: impl Into<String>, market: MarketSnapshot) -> Self {
        self.markets.insert(underlying.into(), market);
        self
    }

    /// Registers several markets.
    pub fn with_markets<I, S>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = (S, MarketSnapshot)>,
        S: Into<String>,
    {
        self.markets
            .extend(markets.into_iter().map(|(u, m)| (u.into(), m)));
        self
    }

    /// Simulation settings for revaluing simulated positions under stress.
    pub fn with_monte_carlo(mut self, config: MonteCarloConfig) -> Self {
        self.stress = self.stress.with_monte_carlo(config);
        self
    }

    /// Parallelism settings for stress revaluation and bulk pricing.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.stress = self.stress.with_parallel(parallel.clone());
        self.parallel = parallel;
        self
    }

    /// Risk configuration.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Pricer used for revaluation.
    pub fn pricer(&self) -> &P {
        &self.pricer
    }

    /// Market registered for `underlying`.
    pub fn market(&self, underlying: &str) -> Result<&MarketSnapshot, RiskError> {
        self.markets
            .get(underlying)
            .ok_or_else(|| RiskError::MissingMarket {
                underlying: underlying.to_string(),
            })
    }

    /// Prices every position against its underlying's market, then
    /// aggregates.
    ///
    /// # Errors
    /// As for [`RiskAggregator::aggregate`], plus any pricing failure.
    pub fn price_and_aggregate(
        &self,
        positions: &[Position],
        config: Option<&MonteCarloConfig>,
    ) -> Result<PortfolioRiskSnapshot, RiskError> {
        let priced = try_parallel_map(positions, &self.parallel, |position| {
            let market = self.market(position.underlying())?;
            let result = self.pricer.price(position.contract(), market, config)?;
            Ok::<_, RiskError>((position.clone(), result))
        })?;
        self.aggregate(&priced)
    }

    /// Aggregates priced positions into portfolio risk.
    ///
    /// # Errors
    /// - `RiskError::EmptyPortfolio` if `positions` is empty
    /// - `RiskError::MissingMarket` if an underlying has no registered market
    /// - `RiskError::Pricing` if stress revaluation fails
    pub fn aggregate(
        &self,
        positions: &[(Position, PricingResult)],
    ) -> Result<PortfolioRiskSnapshot, RiskError> {
        if positions.is_empty() {
            return Err(RiskError::EmptyPortfolio);
        }

        let mut book = Vec::with_capacity(positions.len());
        for (position, result) in positions {
            book.push(StressInput {
                position,
                result,
                market: self.market(position.underlying())?,
            });
        }

        let mut greeks = Greeks::zero();
        let mut greeks_noise: Option<Greeks> = None;
        let mut value_noise: Option<f64> = None;
        let mut net_value = 0.0;
        let mut gross_value = 0.0;
        let mut exposure = RiskExposure::default();
        let mut by_underlying: BTreeMap<String, f64> = BTreeMap::new();

        for input in &book {
            let quantity = input.position.quantity();
            let result = input.result;
            let value = quantity * result.price;

            greeks += result.greeks.scale(quantity);
            net_value += value;
            gross_value += value.abs();
            exposure = exposure
                + RiskExposure::of_position(
                    quantity,
                    result.greeks.delta,
                    result.greeks.vega,
                    input.market.spot(),
                );
            *by_underlying
                .entry(input.position.underlying().to_string())
                .or_insert(0.0) += value.abs();

            if let Some(se) = result.std_error {
                *value_noise.get_or_insert(0.0) += quantity.abs() * se;
            }
            if let Some(se) = result.greeks_std_error {
                *greeks_noise.get_or_insert_with(Greeks::zero) += se.scale(quantity.abs());
            }
        }

        let concentration: BTreeMap<String, f64> = by_underlying
            .into_iter()
            .map(|(underlying, gross)| {
                let share = if gross_value > 0.0 { gross / gross_value } else { 0.0 };
                (underlying, share)
            })
            .collect();
        debug!(underlyings = concentration.len(), "aggregated position Greeks");

        let parametric = parametric_var(exposure, &self.config);
        let stress = self.stress.run(&self.pricer, &book)?;
        let scenario_var = stress.scenario_var();
        let limit_breaches = self.config.limits.check(&greeks, &concentration);

        info!(
            positions = positions.len(),
            net_value,
            delta = greeks.delta,
            vega = greeks.vega,
            var_1d = parametric.var_1d,
            var_horizon = parametric.var_horizon,
            horizon_days = parametric.horizon_days,
            scenario_var,
            rating = %stress.rating,
            breaches = limit_breaches.len(),
            "Portfolio risk aggregated"
        );

        Ok(PortfolioRiskSnapshot {
            position_count: positions.len(),
            greeks,
            greeks_std_error: greeks_noise,
            net_value,
            gross_value,
            value_std_error: value_noise,
            exposure,
            concentration,
            parametric,
            stress,
            scenario_var,
            limit_breaches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pricer_models::instruments::{OptionContract, OptionType};
    use pricer_pricing::{PricingEngine, PricingMethod};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap()
    }

    fn market(spot: f64) -> MarketSnapshot {
        MarketSnapshot::with_implied_vol(spot, 0.04, 0.25, now()).unwrap()
    }

    fn priced(
        engine: &PricingEngine,
        id: &str,
        underlying: &str,
        option_type: OptionType,
        strike: f64,
        quantity: f64,
        market: &MarketSnapshot,
    ) -> (Position, PricingResult) {
        let contract =
            OptionContract::european(underlying, option_type, strike, now() + Duration::days(120))
                .unwrap();
        let result = engine.price(&contract, market, None).unwrap();
        (Position::new(id, contract, quantity).unwrap(), result)
    }

    fn aggregator() -> RiskAggregator<PricingEngine> {
        RiskAggregator::new(PricingEngine::new(), RiskConfig::default())
            .unwrap()
            .with_markets([("AAA", market(100.0)), ("BBB", market(50.0))])
    }

    // ========================================
    // Greeks aggregation
    // ========================================

    #[test]
    fn test_greeks_are_signed_sum() {
        let engine = PricingEngine::new();
        let long = priced(&engine, "L", "AAA", OptionType::Call, 100.0, 10.0, &market(100.0));
        let short = priced(&engine, "S", "AAA", OptionType::Put, 90.0, -4.0, &market(100.0));

        let risk = aggregator().aggregate(&[long.clone(), short.clone()]).unwrap();

        let expected = long.1.greeks.scale(10.0) + short.1.greeks.scale(-4.0);
        assert_relative_eq!(risk.greeks.delta, expected.delta, epsilon = 1e-12);
        assert_relative_eq!(risk.greeks.gamma, expected.gamma, epsilon = 1e-12);
        assert_relative_eq!(risk.greeks.vega, expected.vega, epsilon = 1e-12);
        assert_relative_eq!(risk.greeks.theta, expected.theta, epsilon = 1e-12);
        assert_relative_eq!(risk.greeks.rho, expected.rho, epsilon = 1e-12);
        assert_relative_eq!(
            risk.net_value,
            10.0 * long.1.price - 4.0 * short.1.price,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            risk.gross_value,
            10.0 * long.1.price + 4.0 * short.1.price,
            epsilon = 1e-12
        );
        assert!(risk.greeks_std_error.is_none());
        assert!(risk.value_std_error.is_none());
    }

    #[test]
    fn test_offsetting_positions_flat() {
        let engine = PricingEngine::new();
        let long = priced(&engine, "L", "AAA", OptionType::Call, 100.0, 3.0, &market(100.0));
        let mut short = long.clone();
        short.0 = Position::new("S", long.0.contract().clone(), -3.0).unwrap();

        let risk = aggregator().aggregate(&[long, short]).unwrap();
        assert_relative_eq!(risk.greeks.delta, 0.0, epsilon = 1e-12);
        assert_relative_eq!(risk.net_value, 0.0, epsilon = 1e-12);
        assert_eq!(risk.var_1d(), 0.0);
        assert_relative_eq!(risk.scenario_var, 0.0, epsilon = 1e-9);
        assert_eq!(risk.rating(), StressRating::Low);
    }

    // ========================================
    // VaR
    // ========================================

    #[test]
    fn test_parametric_var_from_exposure() {
        let engine = PricingEngine::new();
        let aaa = market(100.0);
        let bbb = market(50.0);
        let a = priced(&engine, "A", "AAA", OptionType::Call, 100.0, 10.0, &aaa);
        let b = priced(&engine, "B", "BBB", OptionType::Put, 50.0, 20.0, &bbb);

        let risk = aggregator().aggregate(&[a.clone(), b.clone()]).unwrap();

        let dollar_delta = 10.0 * a.1.greeks.delta * 100.0 + 20.0 * b.1.greeks.delta * 50.0;
        let dollar_vega = (10.0 * a.1.greeks.vega + 20.0 * b.1.greeks.vega) * 100.0;
        let sigma = ((dollar_delta * 0.02).powi(2) + (dollar_vega * 0.01).powi(2)).sqrt();

        assert_relative_eq!(risk.exposure.dollar_delta, dollar_delta, epsilon = 1e-9);
        assert_relative_eq!(risk.parametric.sigma_1d, sigma, epsilon = 1e-9);
        assert_relative_eq!(risk.var_1d(), 2.326_347_874 * sigma, epsilon = 1e-6);
        assert_relative_eq!(risk.var_horizon(), risk.var_1d() * 10f64.sqrt(), epsilon = 1e-9);
        assert_eq!(risk.horizon_scaling(), HorizonScaling::SquareRootOfTime);
        assert!(risk.expected_shortfall_1d() > risk.var_1d());
        assert!(risk.expected_shortfall_horizon() > risk.expected_shortfall_1d());
    }

    #[test]
    fn test_ten_day_var_kept_for_other_horizons() {
        let engine = PricingEngine::new();
        let a = priced(&engine, "A", "AAA", OptionType::Call, 100.0, 10.0, &market(100.0));
        let config = RiskConfig {
            horizon_days: 1,
            ..RiskConfig::default()
        };
        let risk = RiskAggregator::new(PricingEngine::new(), config)
            .unwrap()
            .with_market("AAA", market(100.0))
            .aggregate(&[a])
            .unwrap();

        assert_relative_eq!(risk.var_horizon(), risk.var_1d(), epsilon = 1e-12);
        assert_relative_eq!(risk.var_10d(), risk.var_1d() * 10f64.sqrt(), epsilon = 1e-9);
        assert!(risk.expected_shortfall_10d() > risk.var_10d());
    }

    #[test]
    fn test_scenario_var_is_worst_loss() {
        let engine = PricingEngine::new();
        let long = priced(&engine, "L", "AAA", OptionType::Call, 100.0, 10.0, &market(100.0));
        let risk = aggregator().aggregate(&[long]).unwrap();

        let worst = risk.worst_scenario().unwrap();
        assert!(worst.is_loss());
        assert_relative_eq!(risk.scenario_var, -worst.pnl, epsilon = 1e-12);
        let min_pnl = risk
            .stress
            .results
            .iter()
            .map(|r| r.pnl)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(worst.pnl, min_pnl);
    }

    // ========================================
    // Errors and limits
    // ========================================

    #[test]
    fn test_empty_portfolio_rejected() {
        assert_eq!(aggregator().aggregate(&[]).unwrap_err(), RiskError::EmptyPortfolio);
    }

    #[test]
    fn test_missing_market() {
        let engine = PricingEngine::new();
        let position = priced(&engine, "Z", "ZZZ", OptionType::Call, 10.0, 1.0, &market(10.0));
        let err = aggregator().aggregate(&[position]).unwrap_err();
        assert_eq!(
            err,
            RiskError::MissingMarket {
                underlying: "ZZZ".to_string()
            }
        );
    }

    #[test]
    fn test_delta_limit_breach_reported() {
        let engine = PricingEngine::new();
        let big = priced(&engine, "B", "AAA", OptionType::Call, 80.0, 5000.0, &market(100.0));
        let risk = aggregator().aggregate(&[big]).unwrap();
        assert!(risk
            .limit_breaches
            .iter()
            .any(|b| b.metric == crate::limits::LimitMetric::Delta));
    }

    #[test]
    fn test_concentration_shares() {
        let engine = PricingEngine::new();
        let a = priced(&engine, "A", "AAA", OptionType::Call, 100.0, 1.0, &market(100.0));
        let b = priced(&engine, "B", "BBB", OptionType::Call, 50.0, 1.0, &market(50.0));
        let risk = aggregator().aggregate(&[a, b]).unwrap();

        let total: f64 = risk.concentration.values().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert!(risk.concentration["AAA"] > risk.concentration["BBB"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RiskConfig {
            horizon_days: 0,
            ..RiskConfig::default()
        };
        assert!(RiskAggregator::new(PricingEngine::new(), config).is_err());
    }

    #[test]
    fn test_price_and_aggregate_matches_manual() {
        let engine = PricingEngine::new();
        let (position, result) =
            priced(&engine, "A", "AAA", OptionType::Call, 100.0, 2.0, &market(100.0));
        assert_eq!(result.method, PricingMethod::Analytic);

        let agg = aggregator();
        let direct = agg.price_and_aggregate(&[position.clone()], None).unwrap();
        let manual = agg.aggregate(&[(position, result)]).unwrap();
        assert_eq!(direct, manual);
    }
}
