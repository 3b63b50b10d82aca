//! Path payoffs evaluated by the Monte Carlo engine.
//!
//! A [`PathPayoff`] pairs the contract's payoff rule with an observation
//! schedule over the simulation grid: each step carries an observation
//! weight, and only steps with a non-zero weight reach the [`PathObserver`].
//!
//! - Barrier: every step including t=0 is monitored
//! - Asian without fixings: S₀ and every step
//! - Asian with fixings: each fixing snaps to the nearest step in [1, M];
//!   fixings sharing a step all count
//! - Vanilla / Digital: terminal price only

use chrono::{DateTime, Utc};
use pricer_core::types::PricingError;
use pricer_models::instruments::{
    AveragingMethod, BarrierDirection, OptionContract, OptionType, PayoffVariant,
};

use super::PathObserver;

/// Payoff rule without the observation schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PayoffRule {
    /// Vanilla payoff on the terminal price.
    Vanilla,
    /// Knock-in or knock-out on a discretely monitored level.
    Barrier {
        /// Barrier level.
        level: f64,
        /// Direction and knock type.
        direction: BarrierDirection,
    },
    /// Vanilla payoff on the average of the monitored prices.
    Asian {
        /// Arithmetic or geometric mean.
        averaging: AveragingMethod,
    },
    /// Fixed cash amount if the terminal price finishes in the money.
    Digital {
        /// Cash paid.
        payout: f64,
    },
}

/// Payoff evaluated on one simulated path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayoff {
    option_type: OptionType,
    strike: f64,
    rule: PayoffRule,
    weights: Vec<u32>,
}

impl PathPayoff {
    /// Vanilla payoff, used as a reference against the closed form.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_models::instruments::OptionType;
    /// use pricer_pricing::path_dependent::{PathObserver, PathPayoff};
    ///
    /// let payoff = PathPayoff::vanilla(OptionType::Call, 100.0, 10);
    /// let mut observer = PathObserver::new();
    /// observer.set_terminal(112.0);
    /// assert_eq!(payoff.evaluate(&observer), 12.0);
    /// ```
    pub fn vanilla(option_type: OptionType, strike: f64, n_steps: usize) -> Self {
        Self {
            option_type,
            strike,
            rule: PayoffRule::Vanilla,
            weights: vec![0; n_steps + 1],
        }
    }

    /// Barrier payoff monitored at t=0 and every step.
    pub fn barrier(
        option_type: OptionType,
        strike: f64,
        level: f64,
        direction: BarrierDirection,
        n_steps: usize,
    ) -> Self {
        Self {
            option_type,
            strike,
            rule: PayoffRule::Barrier { level, direction },
            weights: vec![1; n_steps + 1],
        }
    }

    /// Asian payoff.
    ///
    /// With no `fixing_times` the average runs over S₀ and every step;
    /// otherwise each fixing (years from valuation) maps to the nearest
    /// step index, clamped to [1, n_steps]. Fixings landing on the same
    /// step keep their full weight in the average.
    pub fn asian(
        option_type: OptionType,
        strike: f64,
        averaging: AveragingMethod,
        fixing_times: &[f64],
        maturity: f64,
        n_steps: usize,
    ) -> Self {
        let weights = if fixing_times.is_empty() {
            vec![1; n_steps + 1]
        } else {
            let dt = maturity / n_steps as f64;
            let mut weights = vec![0; n_steps + 1];
            for &t in fixing_times {
                let step = ((t / dt).round() as usize).clamp(1, n_steps);
                weights[step] += 1;
            }
            weights
        };
        Self {
            option_type,
            strike,
            rule: PayoffRule::Asian { averaging },
            weights,
        }
    }

    /// Cash-or-nothing digital.
    pub fn digital(option_type: OptionType, strike: f64, payout: f64, n_steps: usize) -> Self {
        Self {
            option_type,
            strike,
            rule: PayoffRule::Digital { payout },
            weights: vec![0; n_steps + 1],
        }
    }

    /// Path payoff for `contract` valued at `valuation` on an `n_steps` grid.
    ///
    /// # Errors
    /// - `PricingError::ContractExpired` if expiry is not after valuation
    /// - `PricingError::InvalidContractTerms` if an Asian fixing is not after valuation
    pub fn from_contract(
        contract: &OptionContract,
        valuation: DateTime<Utc>,
        n_steps: usize,
    ) -> Result<Self, PricingError> {
        let maturity = contract.time_to_expiry(valuation)?;
        let (option_type, strike) = (contract.option_type(), contract.strike());

        Ok(match contract.payoff() {
            PayoffVariant::Vanilla => Self::vanilla(option_type, strike, n_steps),
            PayoffVariant::Barrier { level, direction } => {
                Self::barrier(option_type, strike, *level, *direction, n_steps)
            }
            PayoffVariant::Asian { averaging, .. } => {
                let fixings = contract.observation_times(valuation)?;
                Self::asian(option_type, strike, *averaging, &fixings, maturity, n_steps)
            }
            PayoffVariant::Digital { payout } => {
                Self::digital(option_type, strike, *payout, n_steps)
            }
        })
    }

    /// The payoff rule.
    #[inline]
    pub fn rule(&self) -> PayoffRule {
        self.rule
    }

    /// Number of grid steps the schedule was built for.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.weights.len().saturating_sub(1)
    }

    /// How many times the price at `step` enters the observer.
    #[inline]
    pub fn observation_weight(&self, step: usize) -> u32 {
        self.weights.get(step).copied().unwrap_or(0)
    }

    /// Whether the price at `step` feeds the observer.
    #[inline]
    pub fn is_monitored(&self, step: usize) -> bool {
        self.observation_weight(step) > 0
    }

    /// Undiscounted payoff of a completed path.
    #[inline]
    pub fn evaluate(&self, observer: &PathObserver<f64>) -> f64 {
        match self.rule {
            PayoffRule::Vanilla => self.option_type.intrinsic(observer.terminal(), self.strike),
            PayoffRule::Barrier { level, direction } => {
                let touched = if direction.is_up() {
                    direction.is_touched(observer.maximum(), level)
                } else {
                    direction.is_touched(observer.minimum(), level)
                };
                if touched == direction.is_knock_in() {
                    self.option_type.intrinsic(observer.terminal(), self.strike)
                } else {
                    0.0
                }
            }
            PayoffRule::Asian { averaging } => {
                let average = match averaging {
                    AveragingMethod::Arithmetic => observer.arithmetic_average(),
                    AveragingMethod::Geometric => observer.geometric_average(),
                };
                self.option_type.intrinsic(average, self.strike)
            }
            PayoffRule::Digital { payout } => {
                if self.option_type.is_in_the_money(observer.terminal(), self.strike) {
                    payout
                } else {
                    0.0
                }
            }
        }
    }
}
