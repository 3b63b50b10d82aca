//! # Pricer Risk (L4: Application)
//!
//! Portfolio-level risk over priced option positions.
//!
//! This crate provides:
//! - Signed positions in option contracts
//! - Greeks aggregation weighted by signed quantity
//! - Parametric (delta-vega normal) VaR and expected shortfall
//! - A stress battery of named spot/vol/rate shocks with scenario VaR and rating
//! - Aggregate Greek and concentration limits
//! - Rayon-based parallel revaluation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/  - PositionId, Position     │
//! │  var/        - Parametric VaR, ES       │
//! │  scenarios/  - Stress battery, engine   │
//! │  limits      - Greek/concentration caps │
//! │  aggregator  - PortfolioRiskSnapshot    │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  OptionPricer: analytic, tree, MC       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::PricingEngine;
//! use pricer_risk::{Position, RiskAggregator, RiskConfig, StressRating};
//!
//! let now = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
//! let market = MarketSnapshot::with_implied_vol(250.0, 0.045, 0.3, now).unwrap();
//! let put = OptionContract::european("NVDA", OptionType::Put, 240.0, now + Duration::days(60)).unwrap();
//!
//! let aggregator = RiskAggregator::new(PricingEngine::new(), RiskConfig::default())
//!     .unwrap()
//!     .with_market("NVDA", market);
//!
//! let positions = vec![Position::new("HEDGE-1", put, 25.0).unwrap()];
//! let risk = aggregator.price_and_aggregate(&positions, None).unwrap();
//!
//! assert!(risk.greeks.delta < 0.0);
//! assert!(risk.rating() >= StressRating::Low);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` for [`PortfolioRiskSnapshot`] and the reports it holds

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod limits;
pub mod parallel;
pub mod portfolio;
pub mod scenarios;
pub mod var;

pub use aggregator::{PortfolioRiskSnapshot, RiskAggregator};
pub use config::RiskConfig;
pub use error::RiskError;
pub use portfolio::{Position, PositionId};
pub use scenarios::{StressRating, StressScenario};
