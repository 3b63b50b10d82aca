//! Check command implementation
//!
//! Validates the effective configuration and, optionally, an input file
//! without pricing anything.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::config::CliConfig;
use crate::input::BookFile;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig, input: Option<&Path>) -> Result<()> {
    let mc = config.monte_carlo.to_config()?;
    println!("log_level        {}", config.log_level);
    println!(
        "monte_carlo      paths={} steps={} batches={} seed={}",
        mc.n_paths(),
        mc.n_steps(),
        mc.n_batches(),
        mc.seed().map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!(
        "risk             confidence={} horizon={}d scenarios={}",
        config.risk.var_confidence,
        config.risk.horizon_days,
        config.risk.stress_scenarios().len()
    );

    if let Some(path) = input {
        let book = BookFile::load(path)?.into_book(Utc::now())?;
        for position in &book.positions {
            book.market(position.underlying())?;
        }
        info!(positions = book.positions.len(), "Input file is valid");
        println!(
            "input            {} positions, {} markets, {} surface points",
            book.positions.len(),
            book.markets.len(),
            book.surface.len()
        );
    }

    println!("OK");
    Ok(())
}
