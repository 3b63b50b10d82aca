//! Pricer CLI - Command Line Operations for Option Pricing and Risk
//!
//! This is the operational entry point for the option pricing engine.
//!
//! # Commands
//!
//! - `pricer price --input <file>` - Price every position in a book
//! - `pricer risk --input <file>` - Portfolio Greeks, VaR and stress results
//! - `pricer surface --input <file>` - List or query the volatility surface
//! - `pricer implied-vol ...` - Solve for Black-Scholes implied volatility
//! - `pricer check` - Validate configuration and input
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the pricer
//! layers behind a command-line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use commands::{OptionTypeArg, OutputFormat};

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG: &str = "pricer.toml";

/// Option pricing and portfolio risk CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: pricer.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every position in a book file
    Price {
        /// Path to the TOML book file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of Monte Carlo paths (overrides config)
        #[arg(short = 'n', long)]
        num_paths: Option<usize>,

        /// Monte Carlo seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Aggregate portfolio risk for a book file
    Risk {
        /// Path to the TOML book file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of Monte Carlo paths (overrides config)
        #[arg(short = 'n', long)]
        num_paths: Option<usize>,

        /// Monte Carlo seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List or query the volatility surface in an input file
    Surface {
        /// Path to the TOML file holding [[surface]] entries
        #[arg(short, long)]
        input: PathBuf,

        /// Underlying to list or query
        #[arg(short, long)]
        underlying: Option<String>,

        /// Strike to query
        #[arg(short = 'k', long)]
        strike: Option<f64>,

        /// Tenor in days to query
        #[arg(short, long)]
        tenor_days: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Solve for Black-Scholes implied volatility
    ImpliedVol {
        /// Observed option price
        #[arg(long)]
        price: f64,

        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Strike
        #[arg(long)]
        strike: f64,

        /// Continuously-compounded rate
        #[arg(long, default_value_t = 0.0)]
        rate: f64,

        /// Days to expiry
        #[arg(long)]
        expiry_days: f64,

        /// Call or put
        #[arg(long = "type", value_enum)]
        option_type: OptionTypeArg,
    },

    /// Check configuration and, optionally, an input file
    Check {
        /// Input file to validate
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    let config = config::build_config(&path, explicit, cli.verbose)
        .with_context(|| format!("loading configuration from {}", path.display()))?;

    init_tracing(config.log_level.as_filter_str());
    debug!(config = %path.display(), level = %config.log_level, "Configuration loaded");

    let mc_settings = |num_paths: Option<usize>, seed: Option<u64>| {
        let mut settings = config.monte_carlo.clone();
        if let Some(paths) = num_paths {
            settings.paths = paths;
        }
        if seed.is_some() {
            settings.seed = seed;
        }
        settings.to_config()
    };

    match cli.command {
        Commands::Price {
            input,
            num_paths,
            seed,
            format,
        } => {
            let mc = mc_settings(num_paths, seed)?;
            commands::price::run(&input, format, &mc).context("price failed")?;
        }
        Commands::Risk {
            input,
            num_paths,
            seed,
            format,
        } => {
            let mc = mc_settings(num_paths, seed)?;
            commands::risk::run(&input, format, &config.risk, &mc).context("risk failed")?;
        }
        Commands::Surface {
            input,
            underlying,
            strike,
            tenor_days,
            format,
        } => commands::surface::run(&input, underlying.as_deref(), strike, tenor_days, format)
            .context("surface failed")?,
        Commands::ImpliedVol {
            price,
            spot,
            strike,
            rate,
            expiry_days,
            option_type,
        } => commands::implied_vol::run(price, spot, strike, rate, expiry_days, option_type)
            .context("implied volatility failed")?,
        Commands::Check { input } => {
            commands::check::run(&config, input.as_deref()).context("check failed")?
        }
    }

    Ok(())
}
