//! # pricer_core: Foundation Layer for the Option Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 4-layer architecture, providing:
//! - Error taxonomy shared by every pricing call: [`types::PricingError`]
//! - Sensitivity container: [`types::Greeks`]
//! - Year-fraction helpers on `chrono` timestamps (`types::time`)
//! - Immutable market inputs: [`market_data::MarketSnapshot`]
//! - Concurrent implied-volatility store: [`market_data::VolatilitySurface`]
//! - Interpolation and root-finding utilities (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Timestamps and year fractions
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pricer_core::market_data::{MarketSnapshot, VolatilityPoint, VolatilitySurface};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
//! let snapshot = MarketSnapshot::with_implied_vol(100.0, 0.05, 0.2, now).unwrap();
//! assert_eq!(snapshot.spot(), 100.0);
//!
//! let surface = VolatilitySurface::new();
//! surface.upsert(VolatilityPoint::new("BTC", 100.0, 30, 0.55).unwrap());
//! let vol = surface.query("BTC", 120.0, 45.0).unwrap();
//! assert!((vol - 0.55).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Greeks`, `VolatilityPoint` and friends

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
