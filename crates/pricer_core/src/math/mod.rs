//! Numerical utilities: interpolation and root finding.

pub mod interpolators;
pub mod solvers;
