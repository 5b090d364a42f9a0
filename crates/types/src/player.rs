//! Player types: portfolio, power-ups, and the append-only transaction log.

use crate::asset::AssetType;
use crate::{AssetId, PlayerId, STARTING_CASH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Trade Side
// =============================================================================

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

// =============================================================================
// Holding
// =============================================================================

/// A player's position in one asset. A player has at most one holding per
/// asset; quantity is always positive (zero quantity removes the holding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub asset_id: AssetId,
    pub quantity: f64,
    /// Volume-weighted average buy price. Never recomputed on sell.
    pub avg_buy_price: f64,
}

// =============================================================================
// Transaction Record
// =============================================================================

/// Immutable snapshot of one trade at execution time. The per-player log is
/// append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub round: u32,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub asset_id: AssetId,
    pub asset_type: AssetType,
    pub amount: f64,
    pub price: f64,
    pub total_value: f64,
    /// Id of the market event active at trade time, if any.
    pub event_active: Option<String>,
    /// Sentiment level for the asset's type at trade time.
    pub sentiment_at_time: i32,
}

// =============================================================================
// Power-Ups
// =============================================================================

/// A consumable player ability with a fixed number of uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUp {
    pub id: String,
    pub name: String,
    pub description: String,
    pub uses_left: u32,
}

impl PowerUp {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        uses: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            uses_left: uses,
        }
    }
}

// =============================================================================
// Player
// =============================================================================

/// One participant in a session.
///
/// `total_value` and `risk_score` are derived values, recomputed by the
/// engine on every price advance rather than maintained incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Display name, unique within the session.
    pub name: String,
    pub cash: f64,
    /// At most one holding per asset id. Keyed in memory for trade lookups;
    /// a list on the wire.
    #[serde(with = "holdings_wire")]
    pub holdings: HashMap<AssetId, Holding>,
    /// Risk exposure in [0, 100].
    pub risk_score: u32,
    pub power_ups: Vec<PowerUp>,
    /// Cash plus mark-to-market holdings value.
    pub total_value: f64,
    pub ready: bool,
    pub transaction_log: Vec<TransactionRecord>,
    pub avatar_id: Option<String>,
    pub strategy_id: Option<String>,
}

/// Wire format for holdings: an ordered list of [`Holding`], sorted by
/// asset id so output is deterministic.
mod holdings_wire {
    use super::{AssetId, Holding, HashMap};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        holdings: &HashMap<AssetId, Holding>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut list: Vec<&Holding> = holdings.values().collect();
        list.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<AssetId, Holding>, D::Error> {
        let list = Vec::<Holding>::deserialize(deserializer)?;
        Ok(list
            .into_iter()
            .map(|holding| (holding.asset_id.clone(), holding))
            .collect())
    }
}

impl Player {
    /// Create a player with starting cash and the given starter power-ups.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, power_ups: Vec<PowerUp>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cash: STARTING_CASH,
            holdings: HashMap::new(),
            risk_score: 0,
            power_ups,
            total_value: STARTING_CASH,
            ready: false,
            transaction_log: Vec::new(),
            avatar_id: None,
            strategy_id: None,
        }
    }

    /// Whether the player follows the given strategy id.
    pub fn has_strategy(&self, strategy_id: &str) -> bool {
        self.strategy_id.as_deref() == Some(strategy_id)
    }

    /// Number of distinct assets currently held.
    pub fn distinct_holdings(&self) -> usize {
        self.holdings.len()
    }
}
