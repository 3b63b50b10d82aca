//! Implied volatility surface.
//!
//! - [`VolatilityPoint`]: one validated (underlying, strike, tenor, vol) observation
//! - [`VolatilitySurface`]: thread-safe store with bilinear (strike, log-tenor)
//!   interpolation and flat extrapolation

mod point;
mod store;

pub use point::VolatilityPoint;
pub use store::VolatilitySurface;
