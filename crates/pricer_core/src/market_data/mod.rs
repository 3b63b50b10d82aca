//! Market inputs consumed by the pricers.
//!
//! - [`MarketSnapshot`]: immutable spot, rate and volatility input for one pricing call
//! - [`VolatilitySurface`]: concurrent implied-volatility store keyed by
//!   (underlying, strike, tenor)
//! - [`MarketDataError`]: validation and lookup failures

pub mod error;
pub mod snapshot;
pub mod surfaces;

pub use error::MarketDataError;
pub use snapshot::{MarketSnapshot, VolatilityInput};
pub use surfaces::{VolatilityPoint, VolatilitySurface};
