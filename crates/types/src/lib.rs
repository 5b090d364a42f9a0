//! Core types for the trading game simulation.
//!
//! This crate provides the shared data model used across the game engine and
//! the HTTP server: assets, players, holdings, transactions, market events,
//! and match phases. Everything here is plain serializable data; the game
//! logic lives in `sim-core`.
//!
//! Wire names are camelCase so serialized state matches what clients expect.

mod asset;
mod market;
mod phase;
mod player;

pub use asset::{Asset, AssetType, TrendBias};
pub use market::{Avatar, MarketEvent, Scenario, Sentiment, Strategy, default_sentiment};
pub use phase::{Phase, SubPhase};
pub use player::{Holding, Player, PowerUp, TradeSide, TransactionRecord};

// =============================================================================
// Constants
// =============================================================================

/// Number of rounds in a match.
pub const GAME_ROUNDS: u32 = 5;

/// Duration of one round in simulated seconds (also the frame count the
/// per-round event impact is spread over).
pub const ROUND_SECS: u32 = 35;

/// Cash every player starts with.
pub const STARTING_CASH: f64 = 10_000.0;

/// Maximum number of price points kept per asset; oldest evicted first.
pub const HISTORY_CAP: usize = 50;

// =============================================================================
// Identifier Types
// =============================================================================

/// Game (session) identifier, e.g. "default".
pub type GameId = String;

/// Player identifier, stable within a session.
pub type PlayerId = String;

/// Asset ticker identifier, e.g. "AAPL".
pub type AssetId = String;

/// Wall clock time in seconds since the Unix epoch.
pub type EpochSecs = f64;
