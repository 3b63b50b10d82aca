//! Risk command implementation
//!
//! Prices a book and aggregates it into portfolio Greeks, VaR and stress
//! results.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use pricer_pricing::{MonteCarloConfig, PricingEngine};
use pricer_risk::var::TEN_DAY_HORIZON;
use pricer_risk::{PortfolioRiskSnapshot, RiskAggregator, RiskConfig};
use tracing::info;

use super::OutputFormat;
use crate::input::{Book, BookFile};
use crate::Result;

/// Aggregate portfolio risk for `book`
pub fn assess(book: &Book, risk: &RiskConfig, mc: &MonteCarloConfig) -> Result<PortfolioRiskSnapshot> {
    let engine = PricingEngine::new().with_surface(book.surface.clone());
    let aggregator = RiskAggregator::new(engine, risk.clone())?
        .with_markets(book.markets.iter().map(|(u, m)| (u.clone(), *m)))
        .with_monte_carlo(mc.clone());
    Ok(aggregator.price_and_aggregate(&book.positions, Some(mc))?)
}

/// Write a risk snapshot in the requested format
pub fn render<W: Write>(snapshot: &PortfolioRiskSnapshot, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, snapshot)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for result in &snapshot.stress.results {
                writer.serialize(result)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => render_table(snapshot, &mut out)?,
    }
    Ok(())
}

fn render_table<W: Write>(s: &PortfolioRiskSnapshot, out: &mut W) -> std::io::Result<()> {
    let g = &s.greeks;
    let var = &s.parametric;

    writeln!(out, "Positions:        {}", s.position_count)?;
    writeln!(out, "Net value:        {:.4}", s.net_value)?;
    writeln!(out, "Gross value:      {:.4}", s.gross_value)?;
    if let Some(se) = s.value_std_error {
        writeln!(out, "Value noise (≤):  {:.4}", se)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Greeks            delta {:.4}  gamma {:.4}  theta {:.4}  vega {:.4}  rho {:.4}",
        g.delta, g.gamma, g.theta, g.vega, g.rho
    )?;
    writeln!(out)?;
    writeln!(out, "VaR {:.1}% 1d:      {:.4}", var.confidence * 100.0, var.var_1d)?;
    writeln!(
        out,
        "VaR {:.1}% {}d:     {:.4}  (scaled by √{} from 1d, approximation)",
        var.confidence * 100.0,
        var.horizon_days,
        var.var_horizon,
        var.horizon_days
    )?;
    writeln!(out, "ES 1d:            {:.4}", var.es_1d)?;
    writeln!(out, "ES {}d:           {:.4}", var.horizon_days, var.es_horizon)?;
    if var.horizon_days != TEN_DAY_HORIZON {
        writeln!(out, "VaR 10d:          {:.4}  (√10 approximation)", var.var_10d)?;
        writeln!(out, "ES 10d:           {:.4}", var.es_10d)?;
    }
    writeln!(out, "Scenario VaR:     {:.4}", s.scenario_var)?;
    writeln!(out)?;

    writeln!(out, "{:<16} {:>14} {:>9}", "Scenario", "P&L", "% gross")?;
    for r in &s.stress.results {
        writeln!(out, "{:<16} {:>14.4} {:>8.2}%", r.scenario, r.pnl, r.pnl_pct * 100.0)?;
    }
    if let Some(worst) = s.worst_scenario() {
        writeln!(out, "Worst: {}  rating {}", worst.scenario, s.rating())?;
    }

    if !s.limit_breaches.is_empty() {
        writeln!(out)?;
        for breach in &s.limit_breaches {
            writeln!(
                out,
                "LIMIT {}: {:.4} (limit {:.4})",
                breach.metric, breach.value, breach.limit
            )?;
        }
    }
    Ok(())
}

/// Run the risk command
pub fn run(input: &Path, format: OutputFormat, risk: &RiskConfig, mc: &MonteCarloConfig) -> Result<()> {
    info!(input = %input.display(), "Starting risk aggregation");

    let book = BookFile::load(input)?.into_book(Utc::now())?;
    let snapshot = assess(&book, risk, mc)?;
    render(&snapshot, format, std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pricer_risk::RiskError;

    use crate::CliError;

    const BOOK: &str = r#"
        valuation_time = "2026-05-01T00:00:00Z"

        [[markets]]
        underlying = "AAA"
        spot = 100.0
        rate = 0.03
        volatility = 0.25

        [[markets]]
        underlying = "BBB"
        spot = 40.0
        rate = 0.03

        [[surface]]
        underlying = "BBB"
        strike = 40.0
        tenor_days = 90
        volatility = 0.35

        [[positions]]
        id = "A1"
        underlying = "AAA"
        option_type = "call"
        strike = 100.0
        expiry = "2026-11-01T00:00:00Z"
        quantity = 20.0

        [[positions]]
        id = "B1"
        underlying = "BBB"
        option_type = "put"
        strike = 38.0
        expiry = "2026-08-01T00:00:00Z"
        quantity = -50.0
    "#;

    fn book(doc: &str) -> Book {
        BookFile::from_toml_str(doc)
            .unwrap()
            .into_book(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_assess_and_render() {
        let snapshot = assess(&book(BOOK), &RiskConfig::default(), &MonteCarloConfig::default()).unwrap();
        assert_eq!(snapshot.position_count, 2);
        assert_eq!(snapshot.stress.results.len(), 8);

        let mut table = Vec::new();
        render(&snapshot, OutputFormat::Table, &mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        assert!(table.contains("approximation"));
        assert!(table.contains("Crash"));

        let mut json = Vec::new();
        render(&snapshot, OutputFormat::Json, &mut json).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["parametric"]["scaling"], "SquareRootOfTime");
        assert_eq!(parsed["stress"]["results"].as_array().unwrap().len(), 8);

        let mut csv_out = Vec::new();
        render(&snapshot, OutputFormat::Csv, &mut csv_out).unwrap();
        assert_eq!(String::from_utf8(csv_out).unwrap().lines().count(), 9);
    }

    #[test]
    fn test_ten_day_lines_for_other_horizons() {
        let config = RiskConfig {
            horizon_days: 5,
            ..RiskConfig::default()
        };
        let snapshot = assess(&book(BOOK), &config, &MonteCarloConfig::default()).unwrap();
        let mut table = Vec::new();
        render(&snapshot, OutputFormat::Table, &mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        assert!(table.contains("5d:"));
        assert!(table.contains("VaR 10d:"));

        let mut json = Vec::new();
        render(&snapshot, OutputFormat::Json, &mut json).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert!(parsed["parametric"]["var_10d"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_empty_book_is_an_error() {
        let err = assess(&book(""), &RiskConfig::default(), &MonteCarloConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Risk(RiskError::EmptyPortfolio)));
    }
}
