//! Monte Carlo pricing engine.
//!
//! The path count is split into a fixed number of batches. Each batch owns
//! a random stream derived from the base seed and its index, simulates its
//! paths on a rayon worker and returns partial sums. Partials are collected
//! in batch order and folded sequentially, so a seeded run is bit-identical
//! however many threads the pool has.

use rayon::prelude::*;
use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::paths::GbmParams;
use crate::path_dependent::{PathObserver, PathPayoff};
use crate::rng::{stream_seed, PricerRng};
use pricer_core::types::PricingError;

/// Discounted Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEstimate {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of `price`.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
}

impl McEstimate {
    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Partial sums from one batch.
#[derive(Clone, Copy, Debug, Default)]
struct BatchSums {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl BatchSums {
    #[inline]
    fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            count: self.count + other.count,
        }
    }
}

/// Monte Carlo pricer for path payoffs under GBM.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer};
/// use pricer_pricing::path_dependent::PathPayoff;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(1)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let payoff = PathPayoff::vanilla(OptionType::Call, 100.0, 1);
/// let estimate = pricer.estimate(GbmParams::default(), &payoff, 42).unwrap();
/// assert!((estimate.price - 10.45).abs() < 4.0 * estimate.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer after validating `config`.
    ///
    /// # Errors
    /// `ConfigError` if the configuration is out of range.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Discounted expected payoff of `payoff` under `params`.
    ///
    /// Every call with the same `seed` consumes the same random numbers,
    /// which is what common-random-number Greeks rely on.
    ///
    /// # Errors
    /// - `PricingError::InsufficientInputs` for invalid GBM parameters
    /// - `PricingError::SimulationConfigInvalid` if the payoff schedule was
    ///   built for a different step count
    pub fn estimate(
        &self,
        params: GbmParams,
        payoff: &PathPayoff,
        seed: u64,
    ) -> Result<McEstimate, PricingError> {
        if !params.is_valid() {
            return Err(PricingError::InsufficientInputs(format!(
                "invalid simulation parameters: {params:?}"
            )));
        }
        let n_steps = self.config.n_steps();
        if payoff.n_steps() != n_steps {
            return Err(PricingError::SimulationConfigInvalid(format!(
                "payoff schedule has {} steps, simulation has {}",
                payoff.n_steps(),
                n_steps
            )));
        }

        let n_paths = self.config.n_paths();
        let n_batches = self.config.n_batches().min(n_paths);
        let base = n_paths / n_batches;
        let remainder = n_paths % n_batches;
        debug!(n_paths, n_steps, n_batches, seed, "partitioning Monte Carlo batches");

        let partials: Vec<BatchSums> = (0..n_batches)
            .into_par_iter()
            .map(|index| {
                let size = base + usize::from(index < remainder);
                simulate_batch(params, payoff, n_steps, size, stream_seed(seed, index))
            })
            .collect();
        let totals = partials
            .into_iter()
            .fold(BatchSums::default(), BatchSums::merge);

        let n = totals.count as f64;
        let mean = totals.sum / n;
        let variance = if totals.count > 1 {
            ((totals.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
        } else {
            0.0
        };
        let df = params.discount_factor();

        Ok(McEstimate {
            price: df * mean,
            std_error: df * (variance / n).sqrt(),
            n_paths: totals.count,
        })
    }
}

fn simulate_batch(
    params: GbmParams,
    payoff: &PathPayoff,
    n_steps: usize,
    n_paths: usize,
    seed: u64,
) -> BatchSums {
    let mut rng = PricerRng::from_seed(seed);
    let stepper = params.stepper(n_steps);
    let mut observer = PathObserver::new();
    let mut sums = BatchSums::default();

    for _ in 0..n_paths {
        observer.reset();
        let mut spot = params.spot;
        observer.observe_weighted(spot, payoff.observation_weight(0));
        for step in 1..=n_steps {
            spot = stepper.advance(spot, rng.gen_normal());
            observer.observe_weighted(spot, payoff.observation_weight(step));
        }
        observer.set_terminal(spot);

        let value = payoff.evaluate(&observer);
        sums.sum += value;
        sums.sum_sq += value * value;
        sums.count += 1;
    }
    sums
}
