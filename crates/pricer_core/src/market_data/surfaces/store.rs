//! Concurrent implied-volatility store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::point::VolatilityPoint;
use crate::market_data::MarketDataError;
use crate::math::interpolators::{interpolate_flat, lerp};

/// One tenor slice: strikes kept sorted with their volatilities alongside.
#[derive(Debug, Clone, Default)]
struct Smile {
    strikes: Vec<f64>,
    vols: Vec<f64>,
}

impl Smile {
    fn upsert(&mut self, strike: f64, vol: f64) {
        match self.strikes.binary_search_by(|k| k.total_cmp(&strike)) {
            Ok(idx) => self.vols[idx] = vol,
            Err(idx) => {
                self.strikes.insert(idx, strike);
                self.vols.insert(idx, vol);
            }
        }
    }

    fn vol_at(&self, strike: f64) -> Result<f64, MarketDataError> {
        Ok(interpolate_flat(&self.strikes, &self.vols, strike)?)
    }
}

/// All slices for one underlying, keyed by tenor in days.
type UnderlyingSurface = BTreeMap<u32, Smile>;

/// Implied volatility surface keyed by underlying, strike and tenor.
///
/// Reads run concurrently under a shared lock; `upsert` takes the
/// exclusive lock only for the index update itself (points are validated
/// before the lock is taken).
///
/// # Interpolation
///
/// `query` brackets the requested tenor between the nearest stored tenor
/// slices, interpolates each slice linearly in strike, then blends the two
/// results linearly in log-tenor. On a complete grid this is bilinear
/// interpolation in (strike, ln tenor). Outside the observed strikes or
/// tenors the nearest edge value is used (flat extrapolation).
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{VolatilityPoint, VolatilitySurface};
///
/// let surface = VolatilitySurface::new();
/// surface.upsert(VolatilityPoint::new("BTC", 90.0, 30, 0.60).unwrap());
/// surface.upsert(VolatilityPoint::new("BTC", 110.0, 30, 0.50).unwrap());
///
/// let vol = surface.query("BTC", 100.0, 30.0).unwrap();
/// assert!((vol - 0.55).abs() < 1e-12);
///
/// // Flat beyond the last strike
/// assert!((surface.query("BTC", 500.0, 30.0).unwrap() - 0.50).abs() < 1e-12);
///
/// assert!(surface.query("ETH", 100.0, 30.0).is_err());
/// ```
#[derive(Debug, Default)]
pub struct VolatilitySurface {
    index: RwLock<HashMap<String, UnderlyingSurface>>,
}

impl VolatilitySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    // The index is never left half-updated by a panicking writer, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, UnderlyingSurface>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, UnderlyingSurface>> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a point, overwriting any point with the same composite key.
    pub fn upsert(&self, point: VolatilityPoint) {
        let mut index = self.write();
        index
            .entry(point.underlying().to_string())
            .or_default()
            .entry(point.tenor_days())
            .or_default()
            .upsert(point.strike(), point.implied_vol());
    }

    /// Inserts a batch of points under a single exclusive section.
    pub fn upsert_many<I>(&self, points: I)
    where
        I: IntoIterator<Item = VolatilityPoint>,
    {
        let mut index = self.write();
        for point in points {
            index
                .entry(point.underlying().to_string())
                .or_default()
                .entry(point.tenor_days())
                .or_default()
                .upsert(point.strike(), point.implied_vol());
        }
    }

    /// Interpolated implied volatility for `underlying` at `strike` and
    /// `tenor_days` (fractional days allowed).
    ///
    /// # Errors
    /// - `MarketDataError::NoVolatilityData` if the underlying has no points
    /// - `MarketDataError::InvalidStrike` if strike is not positive and finite
    /// - `MarketDataError::InvalidTenor` if the tenor is not finite
    pub fn query(
        &self,
        underlying: &str,
        strike: f64,
        tenor_days: f64,
    ) -> Result<f64, MarketDataError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(MarketDataError::InvalidStrike { strike });
        }
        if !tenor_days.is_finite() {
            return Err(MarketDataError::InvalidTenor { days: tenor_days });
        }

        let index = self.read();
        let slices = index
            .get(underlying)
            .filter(|slices| !slices.is_empty())
            .ok_or_else(|| MarketDataError::NoVolatilityData {
                underlying: underlying.to_string(),
            })?;

        // `as u32` saturates, so negative tenors clamp to the first slice.
        let lower = slices.range(..=tenor_days.floor() as u32).next_back();
        let upper = slices.range(tenor_days.ceil() as u32..).next();

        match (lower, upper) {
            (Some((&t0, lo)), Some((&t1, hi))) if t0 != t1 => {
                let v0 = lo.vol_at(strike)?;
                let v1 = hi.vol_at(strike)?;
                let (l0, l1) = (f64::from(t0).ln(), f64::from(t1).ln());
                let weight = (tenor_days.ln() - l0) / (l1 - l0);
                Ok(lerp(v0, v1, weight))
            }
            (Some((_, smile)), _) | (None, Some((_, smile))) => smile.vol_at(strike),
            (None, None) => Err(MarketDataError::NoVolatilityData {
                underlying: underlying.to_string(),
            }),
        }
    }

    /// Drops every point for `underlying`; returns whether any existed.
    pub fn remove_underlying(&self, underlying: &str) -> bool {
        self.write().remove(underlying).is_some()
    }

    /// Stored points for `underlying`, ordered by tenor then strike.
    pub fn points(&self, underlying: &str) -> Vec<VolatilityPoint> {
        let index = self.read();
        let Some(slices) = index.get(underlying) else {
            return Vec::new();
        };

        slices
            .iter()
            .flat_map(|(&tenor, smile)| {
                smile
                    .strikes
                    .iter()
                    .zip(&smile.vols)
                    .filter_map(move |(&strike, &vol)| {
                        VolatilityPoint::new(underlying, strike, tenor, vol).ok()
                    })
            })
            .collect()
    }

    /// Underlyings with at least one point, sorted.
    pub fn underlyings(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of stored points.
    pub fn len(&self) -> usize {
        self.read()
            .values()
            .flat_map(|slices| slices.values())
            .map(|smile| smile.strikes.len())
            .sum()
    }

    /// Returns `true` if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
