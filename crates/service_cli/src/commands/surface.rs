//! Surface command implementation
//!
//! Loads the `[[surface]]` entries of an input file and either lists the
//! observed points or interpolates a volatility at (strike, tenor).

use std::io::Write;
use std::path::Path;

use pricer_core::market_data::VolatilitySurface;
use serde::Serialize;

use super::OutputFormat;
use crate::input::BookFile;
use crate::{CliError, Result};

/// One interpolated query
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceQuery {
    pub underlying: String,
    pub strike: f64,
    pub tenor_days: f64,
    pub volatility: f64,
}

/// Interpolate on `surface`
pub fn query(
    surface: &VolatilitySurface,
    underlying: &str,
    strike: f64,
    tenor_days: f64,
) -> Result<SurfaceQuery> {
    let volatility = surface.query(underlying, strike, tenor_days)?;
    Ok(SurfaceQuery {
        underlying: underlying.to_string(),
        strike,
        tenor_days,
        volatility,
    })
}

fn render_points<W: Write>(
    surface: &VolatilitySurface,
    underlying: Option<&str>,
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    let underlyings = match underlying {
        Some(u) => vec![u.to_string()],
        None => surface.underlyings(),
    };
    let points: Vec<_> = underlyings.iter().flat_map(|u| surface.points(u)).collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &points)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["underlying", "strike", "tenor_days", "implied_vol"])?;
            for p in &points {
                writer.write_record(&[
                    p.underlying().to_string(),
                    p.strike().to_string(),
                    p.tenor_days().to_string(),
                    p.implied_vol().to_string(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:<10} {:>12} {:>6} {:>8}", "Under", "Strike", "Days", "Vol")?;
            for p in &points {
                writeln!(
                    out,
                    "{:<10} {:>12.4} {:>6} {:>8.4}",
                    p.underlying(),
                    p.strike(),
                    p.tenor_days(),
                    p.implied_vol()
                )?;
            }
        }
    }
    Ok(())
}

/// Run the surface command
pub fn run(
    input: &Path,
    underlying: Option<&str>,
    strike: Option<f64>,
    tenor_days: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let surface = BookFile::load(input)?.build_surface()?;
    let mut out = std::io::stdout().lock();

    match (underlying, strike, tenor_days) {
        (Some(u), Some(k), Some(t)) => {
            let result = query(&surface, u, k, t)?;
            match format {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &result)?;
                    writeln!(out)?;
                }
                _ => writeln!(out, "{} K={} T={}d: {:.6}", u, k, t, result.volatility)?,
            }
            Ok(())
        }
        (_, None, None) => render_points(&surface, underlying, format, out),
        _ => Err(CliError::InvalidArgument(
            "--underlying, --strike and --tenor-days must be given together to query".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SURFACE: &str = r#"
        [[surface]]
        underlying = "BTC"
        strike = 50000.0
        tenor_days = 30
        volatility = 0.6

        [[surface]]
        underlying = "BTC"
        strike = 70000.0
        tenor_days = 30
        volatility = 0.8

        [[surface]]
        underlying = "ETH"
        strike = 3000.0
        tenor_days = 7
        volatility = 0.7
    "#;

    fn surface() -> VolatilitySurface {
        BookFile::from_toml_str(SURFACE).unwrap().build_surface().unwrap()
    }

    #[test]
    fn test_query_interpolates_strike() {
        let result = query(&surface(), "BTC", 60000.0, 30.0).unwrap();
        assert_relative_eq!(result.volatility, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_query_unknown_underlying() {
        let err = query(&surface(), "SOL", 100.0, 30.0).unwrap_err();
        assert!(err.to_string().contains("SOL"));
    }

    #[test]
    fn test_list_points() {
        let mut table = Vec::new();
        render_points(&surface(), None, OutputFormat::Table, &mut table).unwrap();
        assert_eq!(String::from_utf8(table).unwrap().lines().count(), 4);

        let mut csv_out = Vec::new();
        render_points(&surface(), Some("BTC"), OutputFormat::Csv, &mut csv_out).unwrap();
        assert_eq!(String::from_utf8(csv_out).unwrap().lines().count(), 3);
    }
}
