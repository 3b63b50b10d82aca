//! TOML book and surface input files.
//!
//! ```toml
//! valuation_time = "2026-03-02T14:30:00Z"
//!
//! [[markets]]
//! underlying = "SPX"
//! spot = 5100.0
//! rate = 0.045
//! volatility = 0.18          # omit to read the surface
//!
//! [[surface]]
//! underlying = "SPX"
//! strike = 5100.0
//! tenor_days = 30
//! volatility = 0.17
//!
//! [[positions]]
//! id = "P1"
//! underlying = "SPX"
//! option_type = "call"
//! strike = 5200.0
//! expiry = "2026-06-19T20:00:00Z"
//! quantity = 10.0
//! payoff = { Barrier = { level = 5600.0, direction = "UpOut" } }
//! ```
//!
//! Timestamps are quoted RFC 3339 strings.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pricer_core::market_data::{MarketSnapshot, VolatilityInput, VolatilityPoint, VolatilitySurface};
use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType, PayoffVariant};
use pricer_risk::Position;
use serde::Deserialize;

use crate::{CliError, Result};

/// Raw input file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookFile {
    pub valuation_time: Option<DateTime<Utc>>,
    pub markets: Vec<MarketSpec>,
    pub surface: Vec<SurfacePointSpec>,
    pub positions: Vec<PositionSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketSpec {
    pub underlying: String,
    pub spot: f64,
    pub rate: f64,
    pub volatility: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfacePointSpec {
    pub underlying: String,
    pub strike: f64,
    pub tenor_days: u32,
    pub volatility: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionSpec {
    pub id: String,
    pub underlying: String,
    pub option_type: OptionType,
    #[serde(default)]
    pub style: ExerciseStyle,
    pub strike: f64,
    pub expiry: DateTime<Utc>,
    pub quantity: f64,
    #[serde(default = "vanilla")]
    pub payoff: PayoffVariant,
}

fn vanilla() -> PayoffVariant {
    PayoffVariant::Vanilla
}

/// Validated book ready for pricing
#[derive(Debug)]
pub struct Book {
    pub valuation_time: DateTime<Utc>,
    pub markets: HashMap<String, MarketSnapshot>,
    pub surface: Arc<VolatilitySurface>,
    pub positions: Vec<Position>,
}

impl BookFile {
    /// Parse an input document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CliError::InvalidInput(e.to_string()))
    }

    /// Read and parse an input file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Surface built from the `[[surface]]` entries
    pub fn build_surface(&self) -> Result<VolatilitySurface> {
        let points = self
            .surface
            .iter()
            .map(|p| VolatilityPoint::new(p.underlying.as_str(), p.strike, p.tenor_days, p.volatility))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let surface = VolatilitySurface::new();
        surface.upsert_many(points);
        Ok(surface)
    }

    /// Validate every entry and build domain objects
    pub fn into_book(self, now: DateTime<Utc>) -> Result<Book> {
        let valuation_time = self.valuation_time.unwrap_or(now);
        let surface = Arc::new(self.build_surface()?);

        let mut markets = HashMap::with_capacity(self.markets.len());
        for spec in &self.markets {
            let volatility = match spec.volatility {
                Some(vol) => VolatilityInput::Implied(vol),
                None => VolatilityInput::Surface,
            };
            let snapshot = MarketSnapshot::new(spec.spot, spec.rate, volatility, valuation_time)?;
            if markets.insert(spec.underlying.clone(), snapshot).is_some() {
                return Err(CliError::InvalidInput(format!(
                    "duplicate market for {}",
                    spec.underlying
                )));
            }
        }

        let positions = self
            .positions
            .into_iter()
            .map(|spec| -> Result<Position> {
                let contract = OptionContract::new(
                    spec.underlying,
                    spec.option_type,
                    spec.style,
                    spec.strike,
                    spec.expiry,
                    spec.payoff,
                )?;
                Ok(Position::new(spec.id, contract, spec.quantity)?)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Book {
            valuation_time,
            markets,
            surface,
            positions,
        })
    }
}

impl Book {
    /// Market for a position's underlying
    pub fn market(&self, underlying: &str) -> Result<&MarketSnapshot> {
        self.markets.get(underlying).ok_or_else(|| {
            CliError::InvalidInput(format!("no [[markets]] entry for {}", underlying))
        })
    }
}
