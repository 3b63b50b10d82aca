//! Option contract definitions.
//!
//! - [`OptionContract`]: validated contract terms
//! - [`OptionType`], [`ExerciseStyle`]: call/put and exercise right
//! - [`PayoffVariant`]: closed set of payoffs (Vanilla, Barrier, Asian, Digital)
//! - [`InstrumentError`]: construction failures

mod error;
mod exercise;
mod option;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use option::OptionContract;
pub use payoff::{AveragingMethod, BarrierDirection, OptionType, PayoffVariant};
