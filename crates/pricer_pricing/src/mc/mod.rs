//! Monte Carlo simulation under risk-neutral GBM.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (paths, steps, batches, seed)
//! ├── GbmStepper        (exact log-space step)
//! ├── PricerRng         (one stream per batch)
//! └── PathPayoff        (payoff rule + observation schedule)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::{BarrierDirection, OptionType};
//! use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer};
//! use pricer_pricing::path_dependent::PathPayoff;
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(52)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let pricer = MonteCarloPricer::new(config).unwrap();
//!
//! let payoff = PathPayoff::barrier(OptionType::Call, 100.0, 130.0, BarrierDirection::UpOut, 52);
//! let estimate = pricer.estimate(GbmParams::default(), &payoff, 42).unwrap();
//! assert!(estimate.price > 0.0 && estimate.price < 10.45);
//! ```

mod config;
mod error;
mod paths;
mod pricer;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCHES, MAX_BATCHES, MAX_PATHS, MAX_STEPS,
};
pub use error::ConfigError;
pub use paths::{GbmParams, GbmStepper};
pub use pricer::{McEstimate, MonteCarloPricer};
