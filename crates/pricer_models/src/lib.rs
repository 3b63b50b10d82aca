//! # pricer_models: Contracts and Analytical Models
//!
//! ## Layer 2 (Models) Role
//!
//! pricer_models sits above pricer_core and provides:
//! - Option contract terms with a closed payoff variant (`instruments`)
//! - Standard normal distribution functions (`analytical::distributions`)
//! - Black-Scholes closed-form prices and Greeks (`analytical::BlackScholes`)
//! - Cox-Ross-Rubinstein tree for American exercise (`analytical::BinomialTree`)
//! - Implied volatility inversion (`analytical::implied_volatility`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::OptionType;
//!
//! let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
//! let call = bs.price(100.0, 1.0, OptionType::Call);
//! assert!((call - 10.4506).abs() < 1e-3);
//!
//! let greeks = bs.greeks(100.0, 1.0, OptionType::Call);
//! assert!((greeks.delta - 0.6368).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
