//! Price command implementation
//!
//! Prices every position in a book file with the pricer_pricing engine.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use pricer_pricing::{MonteCarloConfig, OptionPricer, PricingEngine, PricingMethod};
use pricer_risk::parallel::{try_parallel_map, ParallelConfig};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::input::{Book, BookFile};
use crate::{CliError, Result};

/// One priced position
#[derive(Debug, Clone, Serialize)]
pub struct PriceRow {
    pub id: String,
    pub underlying: String,
    pub payoff: &'static str,
    pub method: &'static str,
    pub quantity: f64,
    pub price: f64,
    pub std_error: Option<f64>,
    pub value: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

fn method_name(method: PricingMethod) -> &'static str {
    match method {
        PricingMethod::Analytic => "analytic",
        PricingMethod::BinomialTree => "tree",
        PricingMethod::MonteCarlo => "monte-carlo",
    }
}

/// Price every position in `book`
pub fn price_book(book: &Book, mc: &MonteCarloConfig) -> Result<Vec<PriceRow>> {
    let engine = PricingEngine::new().with_surface(book.surface.clone());

    try_parallel_map(&book.positions, &ParallelConfig::default(), |position| {
        let market = book.market(position.underlying())?;
        let contract = position.contract();
        let result = engine.price(contract, market, Some(mc))?;
        Ok::<_, CliError>(PriceRow {
            id: position.id().to_string(),
            underlying: position.underlying().to_string(),
            payoff: contract.payoff().name(),
            method: method_name(result.method),
            quantity: position.quantity(),
            price: result.price,
            std_error: result.std_error,
            value: position.quantity() * result.price,
            delta: result.greeks.delta,
            gamma: result.greeks.gamma,
            theta: result.greeks.theta,
            vega: result.greeks.vega,
            rho: result.greeks.rho,
        })
    })
}

/// Write rows in the requested format
pub fn render<W: Write>(rows: &[PriceRow], format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<10} {:<8} {:<8} {:<11} {:>10} {:>12} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}",
                "ID", "Under", "Payoff", "Method", "Qty", "Price", "±SE", "Delta", "Gamma", "Theta",
                "Vega", "Rho"
            )?;
            for r in rows {
                let se = r
                    .std_error
                    .map_or_else(|| "-".to_string(), |se| format!("{:.4}", se));
                writeln!(
                    out,
                    "{:<10} {:<8} {:<8} {:<11} {:>10.2} {:>12.4} {:>10} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
                    r.id, r.underlying, r.payoff, r.method, r.quantity, r.price, se, r.delta,
                    r.gamma, r.theta, r.vega, r.rho
                )?;
            }
            let total: f64 = rows.iter().map(|r| r.value).sum();
            writeln!(out, "Net value: {:.4}", total)?;
        }
    }
    Ok(())
}

/// Run the price command
pub fn run(input: &Path, format: OutputFormat, mc: &MonteCarloConfig) -> Result<()> {
    info!(input = %input.display(), paths = mc.n_paths(), steps = mc.n_steps(), "Starting pricing");

    let book = BookFile::load(input)?.into_book(Utc::now())?;
    let rows = price_book(&book, mc)?;
    render(&rows, format, std::io::stdout().lock())?;

    info!(positions = rows.len(), "Pricing complete");
    Ok(())
}
