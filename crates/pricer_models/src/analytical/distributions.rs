//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function Φ
//! - `norm_pdf`: Probability density function φ
//! - `norm_inv_cdf`: Quantile function Φ⁻¹ (VaR multipliers)
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Lifts an `f64` constant into `T`.
#[inline]
pub(crate) fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Complementary error function, Abramowitz and Stegun 7.1.26
/// (maximum absolute error 1.5e-7).
///
/// Symmetric by construction: erfc(-x) = 2 - erfc(x), so Φ(x) + Φ(-x) = 1
/// holds to rounding and put-call parity is exact up to floating point.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let a1: T = lit(0.254_829_592);
    let a2: T = lit(-0.284_496_736);
    let a3: T = lit(1.421_413_741);
    let a4: T = lit(-1.453_152_027);
    let a5: T = lit(1.061_405_429);
    let p: T = lit(0.327_591_1);

    let abs_x = x.abs();
    let t = T::one() / (T::one() + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half: T = lit(0.5);
    half * erfc_approx(-x / lit(std::f64::consts::SQRT_2))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x²/2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half: T = lit(0.5);
    lit::<T>(FRAC_1_SQRT_2PI) * (-half * x * x).exp()
}

/// Inverse standard normal CDF (Acklam's rational approximation,
/// relative error below 1.2e-9).
///
/// Returns `±∞` at 0 and 1 and `NaN` outside [0, 1].
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_inv_cdf;
///
/// assert!(norm_inv_cdf(0.5).abs() < 1e-9);
/// assert!((norm_inv_cdf(0.99) - 2.326347874).abs() < 1e-6);
/// assert!((norm_inv_cdf(0.95) - 1.644853627).abs() < 1e-6);
/// ```
pub fn norm_inv_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}
