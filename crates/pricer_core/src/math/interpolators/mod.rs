//! Interpolation helpers.
//!
//! The volatility surface interpolates linearly along strike within each
//! tenor slice, then linearly in log-tenor between the two bracketing
//! slices. Both steps share the [`Bracket`] search and clamp to the nearest
//! edge outside the observed range.

pub mod linear;

pub use linear::{bracket, interpolate_flat, lerp, Bracket};
