//! Portfolio positions.
//!
//! Positions are owned by the caller's portfolio; the risk layer only reads
//! them alongside their pricing results.

mod ids;
mod position;

pub use ids::PositionId;
pub use position::Position;
