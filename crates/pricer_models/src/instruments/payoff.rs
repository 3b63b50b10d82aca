//! Payoff definitions.
//!
//! The payoff is a closed tagged variant; pricers match on it exhaustively,
//! so a new payoff cannot silently fall through to a default branch.

use chrono::{DateTime, Utc};
use num_traits::Float;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Vanilla exercise value `max(±(S − K), 0)`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => (spot - strike).max(T::zero()),
            OptionType::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Strict moneyness: `S > K` for a call, `S < K` for a put.
    #[inline]
    pub fn is_in_the_money<T: Float>(&self, spot: T, strike: T) -> bool {
        match self {
            OptionType::Call => spot > strike,
            OptionType::Put => spot < strike,
        }
    }
}

/// Barrier direction and knock behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierDirection {
    /// Activates when spot rises to the barrier.
    UpIn,
    /// Extinguished when spot rises to the barrier.
    UpOut,
    /// Activates when spot falls to the barrier.
    DownIn,
    /// Extinguished when spot falls to the barrier.
    DownOut,
}

impl BarrierDirection {
    /// Returns `true` for an up barrier.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierDirection::UpIn | BarrierDirection::UpOut)
    }

    /// Returns `true` for a knock-in barrier.
    #[inline]
    pub fn is_knock_in(&self) -> bool {
        matches!(self, BarrierDirection::UpIn | BarrierDirection::DownIn)
    }

    /// Whether `spot` touches `level`: `S ≥ H` for up, `S ≤ H` for down.
    #[inline]
    pub fn is_touched<T: Float>(&self, spot: T, level: T) -> bool {
        if self.is_up() {
            spot >= level
        } else {
            spot <= level
        }
    }

    /// The knock-in counterpart with the same direction.
    #[inline]
    pub fn knock_in(&self) -> Self {
        if self.is_up() {
            BarrierDirection::UpIn
        } else {
            BarrierDirection::DownIn
        }
    }

    /// The knock-out counterpart with the same direction.
    #[inline]
    pub fn knock_out(&self) -> Self {
        if self.is_up() {
            BarrierDirection::UpOut
        } else {
            BarrierDirection::DownOut
        }
    }
}

/// How an Asian payoff averages its observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AveragingMethod {
    /// Σ Sᵢ / n
    #[default]
    Arithmetic,
    /// exp(Σ ln Sᵢ / n)
    Geometric,
}

/// Payoff variant of an option contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierDirection, PayoffVariant};
///
/// let barrier = PayoffVariant::Barrier { level: 120.0, direction: BarrierDirection::UpOut };
/// assert!(barrier.requires_simulation());
/// assert!(!PayoffVariant::Vanilla.requires_simulation());
/// assert_eq!(barrier.name(), "barrier");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffVariant {
    /// Standard call/put on the terminal price.
    Vanilla,
    /// Vanilla payoff conditioned on the path touching `level`.
    Barrier {
        /// Barrier level
        level: f64,
        /// Direction and knock behaviour
        direction: BarrierDirection,
    },
    /// Vanilla payoff applied to the path average.
    Asian {
        /// Arithmetic or geometric mean
        averaging: AveragingMethod,
        /// Fixing dates; empty means every simulation step plus the start
        observation_dates: Vec<DateTime<Utc>>,
    },
    /// Fixed amount paid when the terminal price finishes in the money.
    Digital {
        /// Cash amount paid
        payout: f64,
    },
}

impl PayoffVariant {
    /// Returns `true` for payoffs without a closed form in this engine.
    #[inline]
    pub fn requires_simulation(&self) -> bool {
        !matches!(self, PayoffVariant::Vanilla)
    }

    /// Short lowercase name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffVariant::Vanilla => "vanilla",
            PayoffVariant::Barrier { .. } => "barrier",
            PayoffVariant::Asian { .. } => "asian",
            PayoffVariant::Digital { .. } => "digital",
        }
    }
}
