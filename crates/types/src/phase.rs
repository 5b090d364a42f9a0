//! Match phase state machine types.
//!
//! Phase transitions are monotone: `PreMatch -> Playing -> Finished`, never
//! backwards. `SubPhase` is a derived view over phase and time remaining,
//! used by clients for UI staging.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level match phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreMatch,
    Playing,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::PreMatch => "PRE_MATCH",
            Phase::Playing => "PLAYING",
            Phase::Finished => "FINISHED",
        };
        write!(f, "{}", s)
    }
}

/// Finer-grained stage within a round, derived from `Phase` and the time
/// remaining. The first seconds of a round are a news/reaction window during
/// which prices hold still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubPhase {
    /// Pre-match lobby.
    Intro,
    /// Round started, news window open, market closed.
    News,
    /// Active trading window, prices moving.
    Trading,
    /// Match over.
    Results,
}
