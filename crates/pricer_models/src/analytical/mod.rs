//! Closed-form and lattice pricing models.
//!
//! - [`BlackScholes`]: lognormal closed form for European vanilla and digital payoffs
//! - [`BinomialTree`]: Cox-Ross-Rubinstein lattice for American exercise
//! - [`implied_volatility`]: inversion of the Black-Scholes price
//! - [`distributions`]: standard normal CDF, PDF and inverse CDF

mod binomial;
mod black_scholes;
pub mod distributions;
mod error;
mod implied_vol;

pub use binomial::{BinomialTree, DEFAULT_TREE_STEPS};
pub use black_scholes::{BlackScholes, MIN_TOTAL_VOL};
pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::implied_volatility;
