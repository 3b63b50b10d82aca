//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod implied_vol;
pub mod price;
pub mod risk;
pub mod surface;

use clap::ValueEnum;
use pricer_models::instruments::OptionType;

/// Output format shared by the reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Option type as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(arg: OptionTypeArg) -> Self {
        match arg {
            OptionTypeArg::Call => OptionType::Call,
            OptionTypeArg::Put => OptionType::Put,
        }
    }
}
