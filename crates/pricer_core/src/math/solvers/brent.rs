//! Brent's bracketing root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant and inverse quadratic interpolation. Requires
/// a bracket `[a, b]` with `f(a)` and `f(b)` of opposite sign and is then
/// guaranteed to converge.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x.cos() - x, 0.0, 1.0).unwrap();
/// assert!((root.cos() - root).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` inside `[a, b]`.
    ///
    /// # Errors
    ///
    /// - `SolverError::NoBracket` if `f(a)` and `f(b)` share a sign
    /// - `SolverError::MaxIterationsExceeded` if the budget runs out
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let one = T::one();
        let two = one + one;
        let three = two + one;
        let half = one / two;
        let eps = T::epsilon();

        let (mut a, mut b) = (a, b);
        let (mut fa, mut fb) = (f(a), f(b));

        if fa * fb > zero {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }
        if fa == zero {
            return Ok(a);
        }
        if fb == zero {
            return Ok(b);
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Keep the root between b and c.
            if (fb > zero && fc > zero) || (fb < zero && fc < zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = two * eps * b.abs() + half * self.config.tolerance;
            let m = half * (c - b);

            if m.abs() <= tol || fb.abs() < self.config.tolerance {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (two * m * s, one - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - one)),
                        (q - one) * (r - one) * (s - one),
                    )
                };
                if p > zero {
                    q = -q;
                } else {
                    p = -p;
                }

                let min1 = three * m * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if m > zero {
                b + tol
            } else {
                b - tol
            };
            fb = f(b);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
