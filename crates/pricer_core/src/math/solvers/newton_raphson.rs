//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)`. An optional floor keeps
/// iterates inside the function's domain (volatility must stay positive).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0
/// let f = |x: f64| x * x * x - x - 2.0;
/// let f_prime = |x: f64| 3.0 * x * x - 1.0;
///
/// let root = solver.find_root(f, f_prime, 1.5).unwrap();
/// assert!(f(root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
    floor: Option<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            floor: None,
        }
    }

    /// Clamps every iterate to at least `floor`.
    pub fn with_floor(mut self, floor: T) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);
        let mut x = self.clamp(x0);

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < epsilon || !f_prime_val.is_finite() {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = self.clamp(x - f_val / f_prime_val);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    #[inline]
    fn clamp(&self, x: T) -> T {
        match self.floor {
            Some(floor) if x < floor => floor,
            _ => x,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
