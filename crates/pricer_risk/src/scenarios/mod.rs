//! Stress testing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                Stress Engine                  │
//! ├──────────────────────────────────────────────┤
//! │  StressScenario - Named spot/vol/rate shock  │
//! │  StressEngine   - Revaluation over the book  │
//! │  StressReport   - Per-scenario P&L, rating   │
//! └──────────────────────────────────────────────┘
//! ```

mod engine;
mod presets;

pub use engine::{
    shock_market, StressEngine, StressInput, StressRating, StressReport, StressResult,
    DEFAULT_STRESS_SEED,
};
pub use presets::{default_battery, StressScenario};
