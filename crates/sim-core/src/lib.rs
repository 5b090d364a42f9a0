//! Sim-core: game engine for the round-based trading game.
//!
//! This crate owns the session state machine and market simulation:
//! - Static asset/avatar/strategy/scenario catalog
//! - Stochastic price advancement driven by external polling (pull model)
//! - Round clock: phase transitions and round advancement
//! - Portfolio ledger: buy/sell/power-up operations
//! - Risk scoring and post-match ranking
//! - Process-wide session registry with per-session locking
//!
//! There are no background threads or timers: all time-driven transitions
//! occur synchronously inside whichever call touches a session next.

mod catalog;
pub mod clock;
pub mod engine;
mod error;
mod registry;
mod results;
pub mod risk;
mod session;

pub use catalog::{
    AssetCatalog, POWER_UP_BAILOUT, POWER_UP_RISK_SHIELD, STRATEGY_DIVERSIFIER,
    STRATEGY_HIGH_ROLLER, STRATEGY_SAFETY_FIRST, STRATEGY_SWING_TRADER, avatars, scenarios,
    seed_assets, starter_power_ups, strategies,
};
pub use clock::{ClockStep, MARKET_OPEN_BELOW};
pub use error::{GameError, Result};
pub use registry::{SessionHandle, SessionRegistry};
pub use results::{PlayerResult, PlayerSummary, results};
pub use session::GameSession;
