//! Asset types: simulated tradable instruments and their price history.

use crate::{AssetId, HISTORY_CAP};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// =============================================================================
// Asset Classification
// =============================================================================

/// Broad asset class, used for event impact and sentiment bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Stock,
    Crypto,
    Bond,
    Etf,
}

impl AssetType {
    /// All asset types, in catalog order.
    pub const ALL: [AssetType; 4] = [
        AssetType::Stock,
        AssetType::Crypto,
        AssetType::Bond,
        AssetType::Etf,
    ];
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetType::Stock => "STOCK",
            AssetType::Crypto => "CRYPTO",
            AssetType::Bond => "BOND",
            AssetType::Etf => "ETF",
        };
        write!(f, "{}", s)
    }
}

/// Long-run directional bias of an asset. Informational only; the price
/// process does not currently consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendBias {
    Up,
    Down,
    Sideways,
}

// =============================================================================
// Asset
// =============================================================================

/// A simulated instrument owned by one game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Base volatility scaling the random component of price moves.
    pub base_volatility: f64,
    pub trend_bias: TrendBias,
    pub current_price: f64,
    /// Bounded price history, oldest first. Length never exceeds
    /// [`HISTORY_CAP`].
    pub history: VecDeque<f64>,
}

impl Asset {
    /// Create an asset seeded at `price`, with the seed price as the first
    /// history entry.
    pub fn new(
        id: impl Into<AssetId>,
        name: impl Into<String>,
        asset_type: AssetType,
        base_volatility: f64,
        trend_bias: TrendBias,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_type,
            base_volatility,
            trend_bias,
            current_price: price,
            history: VecDeque::from([price]),
        }
    }

    /// Set a new current price and append it to the bounded history.
    pub fn record_price(&mut self, price: f64) {
        self.current_price = price;
        self.history.push_back(price);
        while self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut asset = Asset::new("AAPL", "Apple Inc.", AssetType::Stock, 0.8, TrendBias::Up, 150.0);
        for i in 0..200 {
            asset.record_price(150.0 + i as f64);
        }
        assert_eq!(asset.history.len(), HISTORY_CAP);
        // Oldest entries evicted first: front is the 151st recorded price.
        assert_eq!(*asset.history.front().unwrap(), 150.0 + 150.0);
        assert_eq!(*asset.history.back().unwrap(), asset.current_price);
    }

    #[test]
    fn test_asset_type_wire_names() {
        assert_eq!(serde_json::to_string(&AssetType::Etf).unwrap(), "\"ETF\"");
        assert_eq!(serde_json::to_string(&AssetType::Stock).unwrap(), "\"STOCK\"");
        let parsed: AssetType = serde_json::from_str("\"CRYPTO\"").unwrap();
        assert_eq!(parsed, AssetType::Crypto);
    }

    #[test]
    fn test_asset_serializes_camel_case() {
        let asset = Asset::new("BTC", "Bitcoin", AssetType::Crypto, 2.5, TrendBias::Sideways, 45_000.0);
        let json = serde_json::to_string(&asset).unwrap();
        assert!(json.contains("\"baseVolatility\":2.5"));
        assert!(json.contains("\"type\":\"CRYPTO\""));
        assert!(json.contains("\"currentPrice\":45000.0"));
    }
}
