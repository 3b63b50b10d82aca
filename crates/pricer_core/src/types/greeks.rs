//! Option sensitivities in reporting units.

use std::ops::{Add, AddAssign, Neg};

/// First and second order sensitivities of an option value.
///
/// All figures are reported in trading-desk units:
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `theta`: value change per calendar day
/// - `vega`: value change per one volatility point (0.01)
/// - `rho`: value change per one rate point (0.01)
///
/// Greeks add component-wise, so position-level figures are combined with
/// [`Greeks::scale`] and `+`.
///
/// # Examples
/// ```
/// use pricer_core::types::Greeks;
///
/// let long = Greeks::new(0.6, 0.02, -0.01, 0.4, 0.5).scale(10.0);
/// let short = Greeks::new(0.3, 0.01, -0.02, 0.2, 0.1).scale(-5.0);
/// let net = long + short;
/// assert!((net.delta - 4.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Sensitivity to spot.
    pub delta: f64,
    /// Second derivative with respect to spot.
    pub gamma: f64,
    /// Value decay per calendar day.
    pub theta: f64,
    /// Sensitivity per volatility point.
    pub vega: f64,
    /// Sensitivity per rate point.
    pub rho: f64,
}

impl Greeks {
    /// Creates a Greeks set from its five components.
    #[inline]
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// All-zero sensitivities.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Multiplies every component by `factor` (e.g. a signed position size).
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.theta.is_finite()
            && self.vega.is_finite()
            && self.rho.is_finite()
    }
}

impl Add for Greeks {
    type Output = Greeks;

    fn add(self, rhs: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + rhs.delta,
            gamma: self.gamma + rhs.gamma,
            theta: self.theta + rhs.theta,
            vega: self.vega + rhs.vega,
            rho: self.rho + rhs.rho,
        }
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Greeks) {
        *self = *self + rhs;
    }
}

impl Neg for Greeks {
    type Output = Greeks;

    fn neg(self) -> Greeks {
        self.scale(-1.0)
    }
}

impl std::iter::Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Greeks {
        iter.fold(Greeks::zero(), Add::add)
    }
}
