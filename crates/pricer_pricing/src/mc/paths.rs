//! Geometric Brownian Motion stepping.
//!
//! Paths are advanced one step at a time with the exact log-space update
//! ```text
//! S(t+Δt) = S(t) × exp((r − σ²/2)Δt + σ√Δt × Z)
//! ```
//! so a path never needs to be stored; observers consume each price as it
//! is produced.

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// `true` if all parameters are finite, spot and maturity positive and
    /// volatility non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity > 0.0
            && self.maturity.is_finite()
    }

    /// Discount factor e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Stepper for a uniform grid of `n_steps` steps over [0, T].
    #[inline]
    pub fn stepper(&self, n_steps: usize) -> GbmStepper {
        let dt = self.maturity / n_steps as f64;
        GbmStepper {
            drift_dt: (self.rate - 0.5 * self.volatility * self.volatility) * dt,
            vol_sqrt_dt: self.volatility * dt.sqrt(),
        }
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

/// Precomputed per-step drift and diffusion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepper {
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmStepper {
    /// Advances `spot` by one step driven by the normal variate `z`.
    #[inline]
    pub fn advance(&self, spot: f64, z: f64) -> f64 {
        spot * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }
}
