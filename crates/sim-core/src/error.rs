//! Error types for game operations.
//!
//! All variants are local, recoverable conditions surfaced to the caller as
//! structured failures; none are process-fatal and no retries are performed
//! internally.

use std::fmt;
use types::{AssetId, Phase, PlayerId};

/// Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while operating on a game session.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A required name was missing or empty.
    EmptyName,
    /// The requested player does not exist in this session.
    PlayerNotFound(PlayerId),
    /// The requested asset does not exist in this session.
    AssetNotFound(AssetId),
    /// The operation is not permitted in the session's current phase.
    WrongPhase { required: Phase, actual: Phase },
    /// Trade amount must be positive.
    InvalidAmount(f64),
    /// The buy cost exceeds the player's cash.
    InsufficientFunds { needed: f64, available: f64 },
    /// The sell amount exceeds the held quantity.
    InsufficientHoldings { requested: f64, held: f64 },
    /// The power-up is missing or has no uses left.
    PowerUpUnavailable(String),
    /// Results were requested before the match finished.
    NotFinished(Phase),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyName => write!(f, "name is required"),
            GameError::PlayerNotFound(id) => write!(f, "player not found: {}", id),
            GameError::AssetNotFound(id) => write!(f, "asset not found: {}", id),
            GameError::WrongPhase { required, actual } => {
                write!(f, "operation requires phase {}, but session is {}", required, actual)
            }
            GameError::InvalidAmount(amount) => {
                write!(f, "trade amount must be positive, got {}", amount)
            }
            GameError::InsufficientFunds { needed, available } => {
                write!(f, "insufficient funds: need {:.2}, have {:.2}", needed, available)
            }
            GameError::InsufficientHoldings { requested, held } => {
                write!(f, "insufficient holdings: requested {}, held {}", requested, held)
            }
            GameError::PowerUpUnavailable(id) => write!(f, "power-up not available: {}", id),
            GameError::NotFinished(phase) => {
                write!(f, "game not finished (phase {})", phase)
            }
        }
    }
}

impl std::error::Error for GameError {}
