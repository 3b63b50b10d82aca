//! # pricer_pricing: Simulation and Pricing Dispatch (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing sits above pricer_core and pricer_models and provides:
//! - Seeded random streams (`rng`)
//! - Monte Carlo simulation under risk-neutral GBM (`mc`)
//! - Path observers and exotic payoffs (`path_dependent`)
//! - Finite-difference Greeks with common random numbers (`greeks`)
//! - [`PricingEngine`]: one `price` entry point that routes each contract to
//!   the closed form, the binomial tree or the simulation
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_models::instruments::{
//!     BarrierDirection, ExerciseStyle, OptionContract, OptionType, PayoffVariant,
//! };
//! use pricer_pricing::mc::MonteCarloConfig;
//! use pricer_pricing::{OptionPricer, PricingEngine};
//!
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let contract = OptionContract::new(
//!     "SPX",
//!     OptionType::Call,
//!     ExerciseStyle::European,
//!     100.0,
//!     now + Duration::days(180),
//!     PayoffVariant::Barrier { level: 125.0, direction: BarrierDirection::UpOut },
//! )
//! .unwrap();
//! let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.03, 0.25, now).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_paths(5_000)
//!     .n_steps(26)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let result = PricingEngine::new()
//!     .price(&contract, &snapshot, Some(&config))
//!     .unwrap();
//! assert!(result.price > 0.0);
//! assert!(result.std_error.is_some());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod engine;
pub mod greeks;
pub mod mc;
pub mod path_dependent;
pub mod rng;

pub use engine::{OptionPricer, PricingEngine};
pub use greeks::{PricingMethod, PricingResult};
pub use mc::{MonteCarloConfig, MonteCarloPricer};
