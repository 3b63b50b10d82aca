//! Pricing dispatch.
//!
//! [`PricingEngine`] resolves the volatility for a contract, then routes by
//! payoff variant and exercise style:
//!
//! | Payoff | Exercise | Route |
//! |--------|----------|-------|
//! | Vanilla | European | Black-Scholes closed form |
//! | Vanilla | American | CRR binomial tree |
//! | Barrier / Asian / Digital | European | Monte Carlo + finite-difference Greeks |
//!
//! American exotics never reach the engine: contract construction rejects them.

use std::sync::Arc;

use pricer_core::market_data::{MarketSnapshot, VolatilityInput, VolatilitySurface};
use pricer_core::types::{PricingError, DAYS_PER_YEAR};
use pricer_models::analytical::{BinomialTree, BlackScholes};
use pricer_models::instruments::{ExerciseStyle, OptionContract, PayoffVariant};
use tracing::{debug, warn};

use crate::greeks::{finite_difference_greeks, GreeksConfig, PricingMethod, PricingResult};
use crate::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer};
use crate::path_dependent::PathPayoff;
use crate::rng::entropy_seed;

/// Anything that can value an option contract against a market snapshot.
///
/// The risk layer revalues positions under shocked snapshots through this
/// trait, so it needs the resolved volatility to shock surface-sourced
/// inputs.
pub trait OptionPricer: Send + Sync {
    /// Fair value and Greeks of one unit of `contract`.
    ///
    /// # Errors
    /// - `PricingError::ContractExpired` if expiry is not after valuation
    /// - `PricingError::NoVolatilityData` if the surface has nothing for the underlying
    /// - `PricingError::SimulationConfigInvalid` for a bad simulation configuration
    fn price(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<PricingResult, PricingError>;

    /// Fair value only, for revaluation where Greeks are not needed.
    ///
    /// # Errors
    /// As for [`OptionPricer::price`].
    fn value(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<f64, PricingError> {
        self.price(contract, snapshot, config).map(|result| result.price)
    }

    /// Volatility the pricer would use for `contract` under `snapshot`.
    ///
    /// # Errors
    /// As for [`OptionPricer::price`].
    fn resolve_volatility(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
    ) -> Result<f64, PricingError>;
}

/// Default pricing engine.
///
/// # Examples
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::{OptionPricer, PricingEngine};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let expiry = now + Duration::milliseconds((365.25 * 86_400_000.0) as i64);
/// let contract = OptionContract::european("SPX", OptionType::Call, 100.0, expiry).unwrap();
/// let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now).unwrap();
///
/// let result = PricingEngine::new().price(&contract, &snapshot, None).unwrap();
/// assert!((result.price - 10.45).abs() < 0.01);
/// assert!((result.greeks.delta - 0.637).abs() < 0.001);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    surface: Option<Arc<VolatilitySurface>>,
    monte_carlo: MonteCarloConfig,
    tree: BinomialTree,
    greeks: GreeksConfig,
}

impl PricingEngine {
    /// Engine with no surface, default simulation, tree and bump settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a shared volatility surface.
    pub fn with_surface(mut self, surface: Arc<VolatilitySurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Simulation settings used when a call passes no configuration.
    ///
    /// # Errors
    /// `PricingError::SimulationConfigInvalid` if `config` is out of range.
    pub fn with_monte_carlo(mut self, config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;
        self.monte_carlo = config;
        Ok(self)
    }

    /// Lattice used for American exercise.
    pub fn with_tree(mut self, tree: BinomialTree) -> Self {
        self.tree = tree;
        self
    }

    /// Bump settings for simulated Greeks.
    pub fn with_greeks_config(mut self, greeks: GreeksConfig) -> Self {
        self.greeks = greeks;
        self
    }

    /// The attached surface, if any.
    pub fn surface(&self) -> Option<&Arc<VolatilitySurface>> {
        self.surface.as_ref()
    }

    /// Default simulation settings.
    pub fn monte_carlo_config(&self) -> &MonteCarloConfig {
        &self.monte_carlo
    }

    fn price_analytic(
        &self,
        contract: &OptionContract,
        spot: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
    ) -> Result<PricingResult, PricingError> {
        let bs = BlackScholes::new(spot, rate, volatility)?;
        if bs.is_total_vol_floored(expiry) {
            warn!(
                underlying = contract.underlying(),
                volatility, expiry, "σ√T below floor, using floored total volatility"
            );
        }
        let price = bs.checked_price(contract.strike(), expiry, contract.option_type())?;
        let greeks = bs.greeks(contract.strike(), expiry, contract.option_type());
        Ok(PricingResult::deterministic(price, greeks, PricingMethod::Analytic))
    }

    fn price_tree(
        &self,
        contract: &OptionContract,
        spot: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
    ) -> Result<PricingResult, PricingError> {
        let (strike, option_type, style) =
            (contract.strike(), contract.option_type(), contract.style());
        let price = self
            .tree
            .price(spot, strike, rate, volatility, expiry, option_type, style)?;
        let greeks = self
            .tree
            .greeks(spot, strike, rate, volatility, expiry, option_type, style)?;
        Ok(PricingResult::deterministic(price, greeks, PricingMethod::BinomialTree))
    }

    fn simulation_inputs(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        volatility: f64,
        expiry: f64,
        config: Option<&MonteCarloConfig>,
    ) -> Result<(MonteCarloPricer, GbmParams, PathPayoff, u64), PricingError> {
        let config = config.unwrap_or(&self.monte_carlo);
        let pricer = MonteCarloPricer::new(config.clone())?;
        let payoff =
            PathPayoff::from_contract(contract, snapshot.valuation_time(), config.n_steps())?;
        let seed = config.seed().unwrap_or_else(entropy_seed);
        let params = GbmParams::new(snapshot.spot(), snapshot.rate(), volatility, expiry);
        Ok((pricer, params, payoff, seed))
    }

    fn price_simulated(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        volatility: f64,
        expiry: f64,
        config: Option<&MonteCarloConfig>,
    ) -> Result<PricingResult, PricingError> {
        let (pricer, params, payoff, seed) =
            self.simulation_inputs(contract, snapshot, volatility, expiry, config)?;

        let fd = finite_difference_greeks(&pricer, params, &payoff, seed, &self.greeks)?;
        Ok(PricingResult {
            price: fd.estimate.price,
            greeks: fd.greeks,
            std_error: Some(fd.estimate.std_error),
            greeks_std_error: Some(fd.std_error),
            method: PricingMethod::MonteCarlo,
        })
    }
}

impl OptionPricer for PricingEngine {
    fn price(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<PricingResult, PricingError> {
        let expiry = contract.time_to_expiry(snapshot.valuation_time())?;
        let volatility = self.resolve_volatility(contract, snapshot)?;
        let (spot, rate) = (snapshot.spot(), snapshot.rate());
        debug!(
            underlying = contract.underlying(),
            payoff = contract.payoff().name(),
            spot,
            rate,
            volatility,
            expiry,
            "pricing contract"
        );

        match (contract.payoff(), contract.style()) {
            (PayoffVariant::Vanilla, ExerciseStyle::European) => {
                self.price_analytic(contract, spot, rate, volatility, expiry)
            }
            (PayoffVariant::Vanilla, ExerciseStyle::American) => {
                self.price_tree(contract, spot, rate, volatility, expiry)
            }
            (
                PayoffVariant::Barrier { .. }
                | PayoffVariant::Asian { .. }
                | PayoffVariant::Digital { .. },
                ExerciseStyle::European,
            ) => self.price_simulated(contract, snapshot, volatility, expiry, config),
            (_, ExerciseStyle::American) => Err(PricingError::InvalidContractTerms(format!(
                "american exercise is not supported for {} payoffs",
                contract.payoff().name()
            ))),
        }
    }

    fn value(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<f64, PricingError> {
        let simulated = contract.payoff().requires_simulation()
            && !contract.style().allows_early_exercise();
        if !simulated {
            return self.price(contract, snapshot, config).map(|result| result.price);
        }

        let expiry = contract.time_to_expiry(snapshot.valuation_time())?;
        let volatility = self.resolve_volatility(contract, snapshot)?;
        let (pricer, params, payoff, seed) =
            self.simulation_inputs(contract, snapshot, volatility, expiry, config)?;
        pricer.estimate(params, &payoff, seed).map(|estimate| estimate.price)
    }

    fn resolve_volatility(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
    ) -> Result<f64, PricingError> {
        let volatility = match snapshot.volatility() {
            VolatilityInput::Implied(volatility) => volatility,
            VolatilityInput::Surface => {
                let expiry = contract.time_to_expiry(snapshot.valuation_time())?;
                let surface =
                    self.surface
                        .as_ref()
                        .ok_or_else(|| PricingError::NoVolatilityData {
                            underlying: contract.underlying().to_string(),
                        })?;
                surface.query(
                    contract.underlying(),
                    contract.strike(),
                    expiry * DAYS_PER_YEAR,
                )?
            }
        };
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::InvalidContractTerms(format!(
                "volatility must be positive, got {volatility}"
            )));
        }
        Ok(volatility)
    }
}

/// Shared pricers behave like the pricer they wrap.
impl<P: OptionPricer + ?Sized> OptionPricer for Arc<P> {
    fn price(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<PricingResult, PricingError> {
        (**self).price(contract, snapshot, config)
    }

    fn value(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        config: Option<&MonteCarloConfig>,
    ) -> Result<f64, PricingError> {
        (**self).value(contract, snapshot, config)
    }

    fn resolve_volatility(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
    ) -> Result<f64, PricingError> {
        (**self).resolve_volatility(contract, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pricer_core::market_data::VolatilityPoint;
    use pricer_models::instruments::{BarrierDirection, OptionType};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    }

    fn one_year() -> DateTime<Utc> {
        now() + Duration::milliseconds((DAYS_PER_YEAR * 86_400_000.0) as i64)
    }

    fn small_mc() -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_paths(4_000)
            .n_steps(12)
            .seed(1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_call() {
        let contract = OptionContract::european("SPX", OptionType::Call, 100.0, one_year()).unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let result = PricingEngine::new().price(&contract, &snapshot, None).unwrap();

        assert_eq!(result.method, PricingMethod::Analytic);
        assert_relative_eq!(result.price, 10.4506, epsilon = 1e-3);
        assert_relative_eq!(result.greeks.delta, 0.6368, epsilon = 1e-3);
        assert!(result.std_error.is_none());
    }

    #[test]
    fn test_expired_contract_fails() {
        let contract =
            OptionContract::european("SPX", OptionType::Put, 100.0, now() - Duration::days(3))
                .unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let err = PricingEngine::new()
            .price(&contract, &snapshot, None)
            .unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_expiry_equal_to_valuation_is_expired() {
        let contract = OptionContract::european("SPX", OptionType::Put, 100.0, now()).unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let err = PricingEngine::new()
            .price(&contract, &snapshot, None)
            .unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_american_routes_to_tree() {
        let contract = OptionContract::new(
            "SPX",
            OptionType::Put,
            ExerciseStyle::American,
            100.0,
            one_year(),
            PayoffVariant::Vanilla,
        )
        .unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let result = PricingEngine::new().price(&contract, &snapshot, None).unwrap();
        assert_eq!(result.method, PricingMethod::BinomialTree);

        let european = BlackScholes::new(100.0, 0.05, 0.2)
            .unwrap()
            .price_put(100.0, 1.0);
        assert!(result.price > european);
    }

    #[test]
    fn test_exotic_routes_to_simulation() {
        let contract = OptionContract::new(
            "SPX",
            OptionType::Call,
            ExerciseStyle::European,
            100.0,
            one_year(),
            PayoffVariant::Barrier {
                level: 130.0,
                direction: BarrierDirection::UpOut,
            },
        )
        .unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        let result = PricingEngine::new()
            .price(&contract, &snapshot, Some(&small_mc()))
            .unwrap();

        assert_eq!(result.method, PricingMethod::MonteCarlo);
        assert!(result.std_error.is_some_and(|se| se > 0.0));
        assert!(result.greeks_std_error.is_some());
    }

    #[test]
    fn test_value_matches_price() {
        let engine = PricingEngine::new();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();

        let barrier = OptionContract::new(
            "SPX",
            OptionType::Put,
            ExerciseStyle::European,
            100.0,
            one_year(),
            PayoffVariant::Barrier {
                level: 80.0,
                direction: BarrierDirection::DownOut,
            },
        )
        .unwrap();
        let priced = engine.price(&barrier, &snapshot, Some(&small_mc())).unwrap();
        let valued = engine.value(&barrier, &snapshot, Some(&small_mc())).unwrap();
        assert_eq!(priced.price, valued);

        let vanilla = OptionContract::european("SPX", OptionType::Call, 100.0, one_year()).unwrap();
        let priced = engine.price(&vanilla, &snapshot, None).unwrap();
        assert_eq!(priced.price, engine.value(&vanilla, &snapshot, None).unwrap());
    }

    #[test]
    fn test_with_monte_carlo_accepts_valid_config() {
        let config = MonteCarloConfig::default().with_seed(1);
        assert!(PricingEngine::new().with_monte_carlo(config).is_ok());
    }

    #[test]
    fn test_surface_volatility_resolution() {
        let surface = Arc::new(VolatilitySurface::new());
        surface.upsert(VolatilityPoint::new("SPX", 100.0, 365, 0.25).unwrap());
        let engine = PricingEngine::new().with_surface(Arc::clone(&surface));

        let contract = OptionContract::european("SPX", OptionType::Call, 100.0, one_year()).unwrap();
        let snapshot = MarketSnapshot::from_surface(100.0, 0.05, now()).unwrap();
        assert_relative_eq!(
            engine.resolve_volatility(&contract, &snapshot).unwrap(),
            0.25,
            epsilon = 1e-12
        );

        let result = engine.price(&contract, &snapshot, None).unwrap();
        let expected = BlackScholes::new(100.0, 0.05, 0.25)
            .unwrap()
            .price_call(100.0, 1.0);
        assert_relative_eq!(result.price, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_surface_data() {
        let engine = PricingEngine::new().with_surface(Arc::new(VolatilitySurface::new()));
        let contract = OptionContract::european("TSLA", OptionType::Call, 100.0, one_year()).unwrap();
        let snapshot = MarketSnapshot::from_surface(100.0, 0.05, now()).unwrap();
        let err = engine.price(&contract, &snapshot, None).unwrap_err();
        assert!(matches!(err, PricingError::NoVolatilityData { underlying } if underlying == "TSLA"));

        let err = PricingEngine::new()
            .price(&contract, &snapshot, None)
            .unwrap_err();
        assert!(matches!(err, PricingError::NoVolatilityData { .. }));
    }

    #[test]
    fn test_shared_engine_through_arc() {
        let engine: Arc<dyn OptionPricer> = Arc::new(PricingEngine::new());
        let contract = OptionContract::european("SPX", OptionType::Call, 100.0, one_year()).unwrap();
        let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now()).unwrap();
        assert!(engine.price(&contract, &snapshot, None).is_ok());
    }
}
