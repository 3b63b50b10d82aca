//! Path-dependent payoff infrastructure.
//!
//! # Key Components
//!
//! - [`PathObserver`]: streaming statistics over the monitored prices of a path
//! - [`PathPayoff`]: payoff rule plus observation schedule on the simulation grid
//! - [`PayoffRule`]: closed set of simulated payoffs (vanilla reference, barrier, Asian, digital)

mod observer;
mod payoff;

pub use observer::PathObserver;
pub use payoff::{PathPayoff, PayoffRule};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use pricer_core::types::PricingError;
    use pricer_models::instruments::{
        AveragingMethod, BarrierDirection, ExerciseStyle, OptionContract, OptionType,
        PayoffVariant,
    };

    fn observe_path(payoff: &PathPayoff, path: &[f64]) -> PathObserver<f64> {
        let mut observer = PathObserver::new();
        for (step, &s) in path.iter().enumerate() {
            observer.observe_weighted(s, payoff.observation_weight(step));
        }
        observer.set_terminal(*path.last().unwrap());
        observer
    }

    // ========================================================================
    // PathObserver Tests
    // ========================================================================

    #[test]
    fn test_path_observer_new() {
        let observer: PathObserver<f64> = PathObserver::new();
        assert_eq!(observer.count(), 0);
        assert_eq!(observer.arithmetic_average(), 0.0);
        assert_eq!(observer.geometric_average(), 0.0);
    }

    #[test]
    fn test_path_observer_statistics() {
        let mut observer: PathObserver<f64> = PathObserver::new();
        for s in [100.0, 110.0, 121.0] {
            observer.observe(s);
        }
        assert_eq!(observer.count(), 3);
        assert_relative_eq!(observer.arithmetic_average(), 331.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(observer.geometric_average(), 110.0, epsilon = 1e-10);
        assert_eq!(observer.maximum(), 121.0);
        assert_eq!(observer.minimum(), 100.0);
    }

    #[test]
    fn test_path_observer_reset() {
        let mut observer: PathObserver<f64> = PathObserver::new();
        observer.observe(100.0);
        observer.set_terminal(100.0);
        observer.reset();
        assert_eq!(observer.count(), 0);
        assert_eq!(observer.terminal(), 0.0);
        assert_eq!(observer.maximum(), f64::NEG_INFINITY);
    }

    // ========================================================================
    // PathPayoff Tests
    // ========================================================================

    #[test]
    fn test_up_and_out_knocked_on_touch() {
        let payoff =
            PathPayoff::barrier(OptionType::Call, 100.0, 120.0, BarrierDirection::UpOut, 3);
        // Touching the level exactly counts.
        let knocked = observe_path(&payoff, &[100.0, 120.0, 110.0, 115.0]);
        assert_eq!(payoff.evaluate(&knocked), 0.0);

        let alive = observe_path(&payoff, &[100.0, 119.9, 110.0, 115.0]);
        assert_relative_eq!(payoff.evaluate(&alive), 15.0);
    }

    #[test]
    fn test_down_and_in_pays_only_after_touch() {
        let payoff = PathPayoff::barrier(OptionType::Put, 100.0, 90.0, BarrierDirection::DownIn, 3);
        let touched = observe_path(&payoff, &[100.0, 89.0, 95.0, 97.0]);
        assert_relative_eq!(payoff.evaluate(&touched), 3.0);

        let untouched = observe_path(&payoff, &[100.0, 91.0, 95.0, 97.0]);
        assert_eq!(payoff.evaluate(&untouched), 0.0);
    }

    #[test]
    fn test_barrier_in_plus_out_is_vanilla_per_path() {
        let path = [100.0, 104.0, 98.0, 111.0, 107.0];
        let vanilla = PathPayoff::vanilla(OptionType::Call, 100.0, 4);
        for (knock_in, knock_out) in [
            (BarrierDirection::UpIn, BarrierDirection::UpOut),
            (BarrierDirection::DownIn, BarrierDirection::DownOut),
        ] {
            let a = PathPayoff::barrier(OptionType::Call, 100.0, 105.0, knock_in, 4);
            let b = PathPayoff::barrier(OptionType::Call, 100.0, 105.0, knock_out, 4);
            let sum = a.evaluate(&observe_path(&a, &path)) + b.evaluate(&observe_path(&b, &path));
            assert_relative_eq!(sum, vanilla.evaluate(&observe_path(&vanilla, &path)));
        }
    }

    #[test]
    fn test_asian_default_schedule_includes_spot() {
        let payoff = PathPayoff::asian(
            OptionType::Call,
            100.0,
            AveragingMethod::Arithmetic,
            &[],
            1.0,
            2,
        );
        let observer = observe_path(&payoff, &[100.0, 110.0, 120.0]);
        assert_eq!(observer.count(), 3);
        assert_relative_eq!(payoff.evaluate(&observer), 10.0);
    }

    #[test]
    fn test_asian_fixings_snap_to_nearest_step() {
        let payoff = PathPayoff::asian(
            OptionType::Put,
            100.0,
            AveragingMethod::Geometric,
            &[0.26, 0.74, 1.0],
            1.0,
            4,
        );
        assert!(!payoff.is_monitored(0));
        assert!(payoff.is_monitored(1));
        assert!(!payoff.is_monitored(2));
        assert!(payoff.is_monitored(3));
        assert!(payoff.is_monitored(4));
        assert_eq!(payoff.n_steps(), 4);
    }

    #[test]
    fn test_path_observer_weighted_observation() {
        let mut observer: PathObserver<f64> = PathObserver::new();
        observer.observe_weighted(100.0, 1);
        observer.observe_weighted(121.0, 3);
        observer.observe_weighted(500.0, 0);
        assert_eq!(observer.count(), 4);
        assert_relative_eq!(observer.arithmetic_average(), 463.0 / 4.0, epsilon = 1e-12);
        let geometric = ((100.0_f64.ln() + 3.0 * 121.0_f64.ln()) / 4.0).exp();
        assert_relative_eq!(observer.geometric_average(), geometric, epsilon = 1e-10);
        assert_eq!(observer.maximum(), 121.0);
    }

    #[test]
    fn test_asian_colliding_fixings_keep_their_weight() {
        // One fixing mid-life and ten in the final days, on a two-step grid.
        let mut fixings = vec![0.5];
        fixings.extend((0..10).map(|i| 1.0 - i as f64 / 365.0));
        let payoff = PathPayoff::asian(
            OptionType::Call,
            100.0,
            AveragingMethod::Arithmetic,
            &fixings,
            1.0,
            2,
        );
        assert_eq!(payoff.observation_weight(0), 0);
        assert_eq!(payoff.observation_weight(1), 1);
        assert_eq!(payoff.observation_weight(2), 10);

        let observer = observe_path(&payoff, &[100.0, 90.0, 121.0]);
        assert_eq!(observer.count(), 11);
        let average = (90.0 + 10.0 * 121.0) / 11.0;
        assert_relative_eq!(observer.arithmetic_average(), average, epsilon = 1e-12);
        assert_relative_eq!(payoff.evaluate(&observer), average - 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_digital_requires_strict_moneyness() {
        let payoff = PathPayoff::digital(OptionType::Call, 100.0, 5.0, 1);
        assert_eq!(payoff.evaluate(&observe_path(&payoff, &[100.0, 100.0])), 0.0);
        assert_eq!(payoff.evaluate(&observe_path(&payoff, &[100.0, 100.5])), 5.0);
    }

    #[test]
    fn test_from_contract_rejects_expired() {
        let valuation = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let contract = OptionContract::european(
            "AAPL",
            OptionType::Call,
            100.0,
            valuation - Duration::days(1),
        )
        .unwrap();
        let err = PathPayoff::from_contract(&contract, valuation, 10).unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_from_contract_maps_asian_fixings() {
        let valuation = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let expiry = valuation + Duration::days(100);
        let contract = OptionContract::new(
            "AAPL",
            OptionType::Call,
            ExerciseStyle::European,
            100.0,
            expiry,
            PayoffVariant::Asian {
                averaging: AveragingMethod::Arithmetic,
                observation_dates: vec![valuation + Duration::days(50), expiry],
            },
        )
        .unwrap();
        let payoff = PathPayoff::from_contract(&contract, valuation, 100).unwrap();
        assert!(payoff.is_monitored(50));
        assert!(payoff.is_monitored(100));
        assert!(!payoff.is_monitored(0));

        // Fixing already past at a later valuation.
        let late = valuation + Duration::days(60);
        let err = PathPayoff::from_contract(&contract, late, 100).unwrap_err();
        assert!(matches!(err, PricingError::InvalidContractTerms(_)));
    }
}
