//! Core types shared across the pricing layers.
//!
//! This module provides:
//! - [`PricingError`], [`SolverError`], [`InterpolationError`]: error taxonomy
//! - [`Greeks`]: first and second order sensitivities in reporting units
//! - `time`: Act/365.25 year fractions on UTC timestamps

pub mod error;
pub mod greeks;
pub mod time;

pub use error::{InterpolationError, PricingError, SolverError};
pub use greeks::Greeks;
pub use time::{days_to_years, year_fraction, years_to_days, DAYS_PER_YEAR};
