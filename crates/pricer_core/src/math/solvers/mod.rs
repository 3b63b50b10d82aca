//! Root-finding solvers for numerical computation.
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! Both use [`SolverConfig`] for:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! Implied volatility uses Newton-Raphson on vega first and falls back to
//! Brent on a fixed volatility bracket.
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = newton.find_root(f, |x| 2.0 * x, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//!
//! let brent = BrentSolver::new(SolverConfig::default());
//! let root = brent.find_root(f, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
