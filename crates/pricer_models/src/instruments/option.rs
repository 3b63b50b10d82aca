//! Option contract terms.

use chrono::{DateTime, Utc};
use pricer_core::types::{year_fraction, PricingError};

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::payoff::{OptionType, PayoffVariant};

/// Immutable option contract.
///
/// Terms are validated once at construction; time-dependent checks
/// (expiry, fixing dates) happen against each valuation time.
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let call = OptionContract::european("BTC", OptionType::Call, 100.0, now + Duration::days(30)).unwrap();
/// assert!(call.time_to_expiry(now).unwrap() > 0.0);
///
/// // Expired relative to a later valuation time
/// let later = now + Duration::days(31);
/// assert!(call.time_to_expiry(later).unwrap_err().is_expired());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionContract {
    underlying: String,
    option_type: OptionType,
    style: ExerciseStyle,
    strike: f64,
    expiry: DateTime<Utc>,
    payoff: PayoffVariant,
}

impl OptionContract {
    /// Creates a validated contract.
    ///
    /// # Errors
    /// - `InstrumentError::EmptyUnderlying` for an empty identifier
    /// - `InstrumentError::InvalidStrike` if strike is not positive and finite
    /// - `InstrumentError::InvalidBarrier` / `InvalidPayout` for malformed payoff terms
    /// - `InstrumentError::InvalidObservationDates` if fixings are unsorted,
    ///   duplicated or after expiry
    /// - `InstrumentError::UnsupportedExercise` for American exotic payoffs
    pub fn new(
        underlying: impl Into<String>,
        option_type: OptionType,
        style: ExerciseStyle,
        strike: f64,
        expiry: DateTime<Utc>,
        payoff: PayoffVariant,
    ) -> Result<Self, InstrumentError> {
        let underlying = underlying.into();
        if underlying.trim().is_empty() {
            return Err(InstrumentError::EmptyUnderlying);
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        validate_payoff(&payoff, expiry)?;
        if style.allows_early_exercise() && payoff.requires_simulation() {
            return Err(InstrumentError::UnsupportedExercise {
                message: format!("american exercise on a {} payoff", payoff.name()),
            });
        }

        Ok(Self {
            underlying,
            option_type,
            style,
            strike,
            expiry,
            payoff,
        })
    }

    /// European vanilla contract.
    pub fn european(
        underlying: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiry: DateTime<Utc>,
    ) -> Result<Self, InstrumentError> {
        Self::new(
            underlying,
            option_type,
            ExerciseStyle::European,
            strike,
            expiry,
            PayoffVariant::Vanilla,
        )
    }

    /// Underlying identifier.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Exercise style.
    #[inline]
    pub fn style(&self) -> ExerciseStyle {
        self.style
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Expiry timestamp.
    #[inline]
    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    /// Payoff variant.
    #[inline]
    pub fn payoff(&self) -> &PayoffVariant {
        &self.payoff
    }

    /// Years from `valuation` to expiry.
    ///
    /// # Errors
    /// `PricingError::ContractExpired` unless expiry is strictly after `valuation`.
    pub fn time_to_expiry(&self, valuation: DateTime<Utc>) -> Result<f64, PricingError> {
        let t = year_fraction(valuation, self.expiry);
        if t > 0.0 {
            Ok(t)
        } else {
            Err(PricingError::ContractExpired {
                expiry: self.expiry,
                valuation,
            })
        }
    }

    /// Asian fixing times in years from `valuation`; empty for other payoffs
    /// or when the average runs over every simulation step.
    ///
    /// # Errors
    /// `PricingError::InvalidContractTerms` if a fixing is at or before
    /// `valuation` (past fixings are not supplied to this engine).
    pub fn observation_times(&self, valuation: DateTime<Utc>) -> Result<Vec<f64>, PricingError> {
        let PayoffVariant::Asian {
            observation_dates, ..
        } = &self.payoff
        else {
            return Ok(Vec::new());
        };

        observation_dates
            .iter()
            .map(|&date| {
                let t = year_fraction(valuation, date);
                if t > 0.0 {
                    Ok(t)
                } else {
                    Err(PricingError::InvalidContractTerms(format!(
                        "observation date {date} is not after valuation time {valuation}"
                    )))
                }
            })
            .collect()
    }
}

fn validate_payoff(payoff: &PayoffVariant, expiry: DateTime<Utc>) -> Result<(), InstrumentError> {
    match payoff {
        PayoffVariant::Vanilla => Ok(()),
        PayoffVariant::Barrier { level, .. } => {
            if level.is_finite() && *level > 0.0 {
                Ok(())
            } else {
                Err(InstrumentError::InvalidBarrier { level: *level })
            }
        }
        PayoffVariant::Digital { payout } => {
            if payout.is_finite() && *payout > 0.0 {
                Ok(())
            } else {
                Err(InstrumentError::InvalidPayout { payout: *payout })
            }
        }
        PayoffVariant::Asian {
            observation_dates, ..
        } => {
            if observation_dates.windows(2).any(|w| w[1] <= w[0]) {
                return Err(InstrumentError::InvalidObservationDates {
                    message: "dates must be strictly increasing".to_string(),
                });
            }
            match observation_dates.last() {
                Some(last) if *last > expiry => Err(InstrumentError::InvalidObservationDates {
                    message: format!("date {last} falls after expiry {expiry}"),
                }),
                _ => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{AveragingMethod, BarrierDirection};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn asian(dates: Vec<DateTime<Utc>>) -> Result<OptionContract, InstrumentError> {
        OptionContract::new(
            "BTC",
            OptionType::Call,
            ExerciseStyle::European,
            100.0,
            now() + Duration::days(90),
            PayoffVariant::Asian {
                averaging: AveragingMethod::Arithmetic,
                observation_dates: dates,
            },
        )
    }

    #[test]
    fn test_invalid_strike() {
        let result = OptionContract::european("BTC", OptionType::Put, 0.0, now());
        assert_eq!(result, Err(InstrumentError::InvalidStrike { strike: 0.0 }));
    }

    #[test]
    fn test_empty_underlying() {
        let result = OptionContract::european("  ", OptionType::Put, 100.0, now());
        assert_eq!(result, Err(InstrumentError::EmptyUnderlying));
    }

    #[test]
    fn test_expiry_equal_to_valuation_is_expired() {
        let contract = OptionContract::european("BTC", OptionType::Call, 100.0, now()).unwrap();
        assert!(matches!(
            contract.time_to_expiry(now()),
            Err(PricingError::ContractExpired { .. })
        ));
    }

    #[test]
    fn test_expiry_microseconds_ahead_is_live() {
        let expiry = now() + Duration::microseconds(500);
        let contract = OptionContract::european("BTC", OptionType::Call, 100.0, expiry).unwrap();
        let t = contract.time_to_expiry(now()).unwrap();
        assert!(t > 0.0);
    }

    #[test]
    fn test_malformed_barrier_and_digital() {
        let barrier = OptionContract::new(
            "BTC",
            OptionType::Call,
            ExerciseStyle::European,
            100.0,
            now(),
            PayoffVariant::Barrier {
                level: -5.0,
                direction: BarrierDirection::UpOut,
            },
        );
        assert_eq!(barrier, Err(InstrumentError::InvalidBarrier { level: -5.0 }));

        let digital = OptionContract::new(
            "BTC",
            OptionType::Call,
            ExerciseStyle::European,
            100.0,
            now(),
            PayoffVariant::Digital { payout: f64::NAN },
        );
        assert!(matches!(digital, Err(InstrumentError::InvalidPayout { .. })));
    }

    #[test]
    fn test_american_exotic_rejected() {
        let result = OptionContract::new(
            "BTC",
            OptionType::Call,
            ExerciseStyle::American,
            100.0,
            now(),
            PayoffVariant::Digital { payout: 1.0 },
        );
        assert!(matches!(
            result,
            Err(InstrumentError::UnsupportedExercise { .. })
        ));
    }

    #[test]
    fn test_observation_dates_validation() {
        let d1 = now() + Duration::days(30);
        let d2 = now() + Duration::days(60);
        assert!(asian(vec![d1, d2]).is_ok());
        assert!(asian(vec![d2, d1]).is_err());
        assert!(asian(vec![d1, d1]).is_err());
        assert!(asian(vec![now() + Duration::days(120)]).is_err());
    }

    #[test]
    fn test_observation_times_reject_past_fixings() {
        let contract = asian(vec![now() + Duration::days(30), now() + Duration::days(60)]).unwrap();

        let times = contract.observation_times(now()).unwrap();
        assert_eq!(times.len(), 2);
        assert!(times[0] < times[1]);

        let late = now() + Duration::days(45);
        assert!(matches!(
            contract.observation_times(late),
            Err(PricingError::InvalidContractTerms(_))
        ));
    }
}
