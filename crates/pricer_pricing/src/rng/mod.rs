//! # Random Number Generation
//!
//! Seeded pseudo-random streams for Monte Carlo simulation.
//!
//! - **Reproducibility**: a base seed fixes every batch stream
//! - **Independence**: batch streams are decorrelated with SplitMix64 so
//!   that neighbouring batch indices do not share low-entropy seeds
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{stream_seed, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(stream_seed(12345, 0));
//!
//! let normal_value = rng.gen_normal();
//! assert!(normal_value.is_finite());
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{entropy_seed, stream_seed, PricerRng};
