//! Year-fraction helpers on UTC timestamps.
//!
//! Times to expiry are measured Act/365.25 on elapsed time at nanosecond
//! resolution, so intraday expiries price with their true remaining life.

use chrono::{DateTime, Utc};

/// Calendar days per year used for year fractions.
pub const DAYS_PER_YEAR: f64 = 365.25;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Year fraction between two timestamps (negative if `end` precedes `start`).
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use pricer_core::types::year_fraction;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = start + Duration::hours(6);
/// assert!((year_fraction(start, end) - 0.25 / 365.25).abs() < 1e-15);
/// ```
#[inline]
pub fn year_fraction(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let elapsed = end.signed_duration_since(start);
    // Nanoseconds overflow i64 beyond ~292 years.
    let seconds = match elapsed.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => elapsed.num_milliseconds() as f64 / 1e3,
    };
    seconds / (SECONDS_PER_DAY * DAYS_PER_YEAR)
}

/// Converts a year fraction to calendar days.
#[inline]
pub fn years_to_days(years: f64) -> f64 {
    years * DAYS_PER_YEAR
}

/// Converts calendar days to a year fraction.
#[inline]
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_one_julian_year() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::milliseconds((365.25 * 86_400_000.0) as i64);
        assert_relative_eq!(year_fraction(start, end), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_when_reversed() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(year_fraction(start, end) < 0.0);
    }

    #[test]
    fn test_sub_millisecond_interval_is_positive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::microseconds(500);
        let t = year_fraction(start, end);
        assert!(t > 0.0);
        assert_relative_eq!(t, 5e-4 / (86_400.0 * 365.25), max_relative = 1e-12);
    }

    #[test]
    fn test_multi_century_interval_falls_back() {
        let start = Utc.with_ymd_and_hms(1800, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2200, 1, 1, 0, 0, 0).unwrap();
        assert_relative_eq!(year_fraction(start, end), 400.0, epsilon = 0.01);
    }

    #[test]
    fn test_day_conversions_invert() {
        assert_relative_eq!(days_to_years(years_to_days(0.7)), 0.7, epsilon = 1e-15);
        assert_relative_eq!(years_to_days(1.0), 365.25);
    }
}
