//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Short-dated floor
//!
//! For very short-dated options σ√T can underflow towards zero, which would
//! blow d₁ up to ±∞ (or NaN when ln(S/K) is also zero). The denominator is
//! floored at [`MIN_TOTAL_VOL`]; prices then collapse smoothly onto
//! discounted intrinsic value. [`BlackScholes::is_total_vol_floored`] lets
//! callers report when the substitution happened.

use num_traits::Float;
use pricer_core::types::Greeks;

use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Floor applied to σ√T in d₁/d₂ and in the Greeks denominators.
pub const MIN_TOTAL_VOL: f64 = 1e-8;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero() && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero() && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// σ√T, floored at [`MIN_TOTAL_VOL`].
    #[inline]
    pub fn total_vol(&self, expiry: T) -> T {
        let raw = self.volatility * expiry.max(T::zero()).sqrt();
        raw.max(lit(MIN_TOTAL_VOL))
    }

    /// Whether the σ√T floor is active for `expiry`.
    #[inline]
    pub fn is_total_vol_floored(&self, expiry: T) -> bool {
        self.volatility * expiry.max(T::zero()).sqrt() < lit(MIN_TOTAL_VOL)
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half: T = lit(0.5);
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / self.total_vol(expiry)
    }

    /// d₂ = d₁ − σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.total_vol(expiry)
    }

    #[inline]
    fn discount(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    /// European call price.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.total_vol(expiry);
        self.spot * norm_cdf(d1) - strike * self.discount(expiry) * norm_cdf(d2)
    }

    /// European put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.total_vol(expiry);
        strike * self.discount(expiry) * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// European price for either option type.
    #[inline]
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// European price with expiry validation.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidExpiry` if `expiry <= 0`.
    pub fn checked_price(
        &self,
        strike: T,
        expiry: T,
        option_type: OptionType,
    ) -> Result<T, AnalyticalError> {
        if !(expiry > T::zero()) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.price(strike, expiry, option_type))
    }

    /// Cash-or-nothing digital: `payout·e^(−rT)·N(±d₂)`.
    pub fn digital_price(&self, strike: T, expiry: T, option_type: OptionType, payout: T) -> T {
        let d2 = self.d2(strike, expiry);
        let prob = match option_type {
            OptionType::Call => norm_cdf(d2),
            OptionType::Put => norm_cdf(-d2),
        };
        payout * self.discount(expiry) * prob
    }

    /// ∂V/∂S: N(d₁) for calls, N(d₁) − 1 for puts.
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let nd1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => nd1,
            OptionType::Put => nd1 - T::one(),
        }
    }

    /// ∂²V/∂S² = φ(d₁) / (S·σ√T), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        norm_pdf(self.d1(strike, expiry)) / (self.spot * self.total_vol(expiry))
    }

    /// ∂V/∂σ = S·φ(d₁)·√T per unit volatility.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        self.spot * norm_pdf(self.d1(strike, expiry)) * expiry.sqrt()
    }

    /// ∂V/∂t per year (negative of ∂V/∂T).
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let half: T = lit(0.5);
        let tv = self.total_vol(expiry);
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - tv;
        // σ/(2√T) written as σ²/(2σ√T) so the floor also bounds it.
        let decay =
            -self.spot * norm_pdf(d1) * self.volatility * self.volatility * half / tv;
        let carry = self.rate * strike * self.discount(expiry);
        match option_type {
            OptionType::Call => decay - carry * norm_cdf(d2),
            OptionType::Put => decay + carry * norm_cdf(-d2),
        }
    }

    /// ∂V/∂r per unit rate.
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let d2 = self.d2(strike, expiry);
        let k_t_df = strike * expiry * self.discount(expiry);
        match option_type {
            OptionType::Call => k_t_df * norm_cdf(d2),
            OptionType::Put => -k_t_df * norm_cdf(-d2),
        }
    }
}

impl BlackScholes<f64> {
    /// All five Greeks in reporting units: theta per calendar day (÷365),
    /// vega per volatility point (÷100), rho per rate point (÷100).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let g = bs.greeks(100.0, 1.0, OptionType::Put);
    /// assert!(g.delta < 0.0 && g.delta > -1.0);
    /// assert!(g.gamma > 0.0);
    /// ```
    pub fn greeks(&self, strike: f64, expiry: f64, option_type: OptionType) -> Greeks {
        Greeks {
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            theta: self.theta(strike, expiry, option_type) / 365.0,
            vega: self.vega(strike, expiry) / 100.0,
            rho: self.rho(strike, expiry, option_type) / 100.0,
        }
    }
}
