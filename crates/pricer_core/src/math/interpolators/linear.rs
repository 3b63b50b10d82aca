//! Piecewise linear interpolation with flat extrapolation.

use crate::types::InterpolationError;

/// Position of a query abscissa relative to a sorted knot vector.
///
/// `weight` is the fractional distance from `lower` towards `upper`; it is
/// zero when the query sits on a knot or outside the knot range (in which
/// case `lower == upper` is the nearest edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Index of the knot at or below the query.
    pub lower: usize,
    /// Index of the knot at or above the query.
    pub upper: usize,
    /// Interpolation weight in [0, 1].
    pub weight: f64,
}

/// Locates `x` within strictly increasing `xs`, clamping outside the range.
///
/// # Errors
///
/// Returns `InterpolationError::InsufficientData` if `xs` is empty.
///
/// # Examples
///
/// ```
/// use pricer_core::math::interpolators::bracket;
///
/// let b = bracket(&[1.0, 2.0, 4.0], 3.0).unwrap();
/// assert_eq!((b.lower, b.upper), (1, 2));
/// assert!((b.weight - 0.5).abs() < 1e-12);
///
/// let edge = bracket(&[1.0, 2.0, 4.0], 10.0).unwrap();
/// assert_eq!((edge.lower, edge.upper, edge.weight), (2, 2, 0.0));
/// ```
pub fn bracket(xs: &[f64], x: f64) -> Result<Bracket, InterpolationError> {
    let n = xs.len();
    if n == 0 {
        return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
    }

    if x <= xs[0] {
        return Ok(Bracket {
            lower: 0,
            upper: 0,
            weight: 0.0,
        });
    }
    if x >= xs[n - 1] {
        return Ok(Bracket {
            lower: n - 1,
            upper: n - 1,
            weight: 0.0,
        });
    }

    // First knot strictly greater than x; guaranteed in 1..n by the checks above.
    let upper = xs.partition_point(|&k| k <= x);
    let lower = upper - 1;
    let width = xs[upper] - xs[lower];
    let weight = if width > 0.0 {
        (x - xs[lower]) / width
    } else {
        0.0
    };

    Ok(Bracket {
        lower,
        upper,
        weight,
    })
}

/// Linear blend `a + w·(b − a)`.
#[inline]
pub fn lerp(a: f64, b: f64, weight: f64) -> f64 {
    a + weight * (b - a)
}

/// Interpolates `ys` at `x` with flat (nearest-edge) extrapolation.
///
/// # Errors
///
/// - `InterpolationError::LengthMismatch` if `xs` and `ys` differ in length
/// - `InterpolationError::InsufficientData` if no knots are supplied
/// - `InterpolationError::UnsortedKnots` if `xs` is not strictly increasing
///
/// # Examples
///
/// ```
/// use pricer_core::math::interpolators::interpolate_flat;
///
/// let xs = [90.0, 100.0, 110.0];
/// let ys = [0.25, 0.20, 0.22];
/// assert!((interpolate_flat(&xs, &ys, 95.0).unwrap() - 0.225).abs() < 1e-12);
/// assert_eq!(interpolate_flat(&xs, &ys, 50.0).unwrap(), 0.25);
/// ```
pub fn interpolate_flat(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(InterpolationError::UnsortedKnots);
    }

    let b = bracket(xs, x)?;
    Ok(lerp(ys[b.lower], ys[b.upper], b.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_single_knot_is_constant() {
        assert_relative_eq!(interpolate_flat(&[5.0], &[0.3], -1.0).unwrap(), 0.3);
        assert_relative_eq!(interpolate_flat(&[5.0], &[0.3], 9.0).unwrap(), 0.3);
    }

    #[test]
    fn test_exact_knot_hit() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [10.0, 20.0, 40.0];
        assert_relative_eq!(interpolate_flat(&xs, &ys, 2.0).unwrap(), 20.0);
        assert_relative_eq!(interpolate_flat(&xs, &ys, 2.5).unwrap(), 30.0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            interpolate_flat(&[], &[], 1.0),
            Err(InterpolationError::InsufficientData { .. })
        ));
        assert!(matches!(
            interpolate_flat(&[1.0, 2.0], &[1.0], 1.0),
            Err(InterpolationError::LengthMismatch { .. })
        ));
        assert!(matches!(
            interpolate_flat(&[2.0, 1.0], &[1.0, 2.0], 1.0),
            Err(InterpolationError::UnsortedKnots)
        ));
    }

    proptest! {
        #[test]
        fn prop_result_within_knot_range(x in -100.0..300.0f64) {
            let xs = [0.0, 50.0, 100.0, 200.0];
            let ys = [0.4, 0.1, 0.3, 0.2];
            let v = interpolate_flat(&xs, &ys, x).unwrap();
            prop_assert!(v >= 0.1 - 1e-12 && v <= 0.4 + 1e-12);
        }
    }
}
