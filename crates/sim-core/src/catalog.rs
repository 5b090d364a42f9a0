//! Static reference data: the asset catalog seed plus avatar, strategy,
//! scenario, and starter power-up tables.
//!
//! All of this is configuration with fixed values, consumed at session
//! creation and at display time. It is immutable process-wide and needs no
//! synchronization.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use types::{Asset, AssetId, AssetType, Avatar, PowerUp, Scenario, Strategy, TrendBias};

// =============================================================================
// Well-Known Ids
// =============================================================================

/// Strategy granting +15% on winning trades (flavor only).
pub const STRATEGY_HIGH_ROLLER: &str = "HIGH_ROLLER";
/// Strategy granting a -10 risk score discount.
pub const STRATEGY_SAFETY_FIRST: &str = "SAFETY_FIRST";
/// Strategy granting +5% final value when holding 4+ distinct assets.
pub const STRATEGY_DIVERSIFIER: &str = "DIVERSIFIER";
/// Strategy for quick-profit players (flavor only).
pub const STRATEGY_SWING_TRADER: &str = "SWING_TRADER";

/// Power-up: instantly reduces risk score by 20.
pub const POWER_UP_RISK_SHIELD: &str = "future-glimpse";
/// Power-up: instantly grants $1000 cash.
pub const POWER_UP_BAILOUT: &str = "market-freeze";

// =============================================================================
// Seed Tables
// =============================================================================

/// The four simulated instruments every session starts with.
pub fn seed_assets() -> Vec<Asset> {
    vec![
        Asset::new("AAPL", "Apple Inc.", AssetType::Stock, 0.8, TrendBias::Up, 150.0),
        Asset::new("BTC", "Bitcoin", AssetType::Crypto, 2.5, TrendBias::Sideways, 45_000.0),
        Asset::new("GOVT", "Government Bonds", AssetType::Bond, 0.3, TrendBias::Sideways, 100.0),
        Asset::new("SPY", "S&P 500 ETF", AssetType::Etf, 0.6, TrendBias::Up, 400.0),
    ]
}

/// Selectable player avatars.
pub fn avatars() -> Vec<Avatar> {
    let avatar = |id: &str, name: &str, description: &str, effect: &str| Avatar {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        effect_description: effect.into(),
    };
    vec![
        avatar("ANALYST", "The Analyst", "Data-driven decision maker", "Better risk assessment"),
        avatar("DEGEN", "The Degen", "High risk, high reward", "Bonus on volatile assets"),
        avatar("STRATEGIST", "The Strategist", "Long-term planner", "Reduced fees"),
        avatar("MEME_LORD", "The Meme Lord", "Rides the hype", "Sentiment bonus"),
    ]
}

/// Selectable play strategies.
pub fn strategies() -> Vec<Strategy> {
    let strategy = |id: &str, name: &str, bonus: &str, tooltip: &str| Strategy {
        id: id.into(),
        name: name.into(),
        bonus_description: bonus.into(),
        tooltip: tooltip.into(),
    };
    vec![
        strategy(STRATEGY_HIGH_ROLLER, "High Roller", "+15% on wins", "High risk, high reward"),
        strategy(STRATEGY_SAFETY_FIRST, "Safety First", "-10% risk score", "Conservative approach"),
        strategy(STRATEGY_DIVERSIFIER, "Diversifier", "+5% if 4+ assets", "Spread your bets"),
        strategy(STRATEGY_SWING_TRADER, "Swing Trader", "Quick profit bonus", "Buy low, sell high"),
    ]
}

/// Match scenarios; one is chosen uniformly at random on match start.
pub fn scenarios() -> Vec<Scenario> {
    let scenario = |id: &str, title: &str, description: &str, effect: &str| Scenario {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        effect_description: effect.into(),
    };
    vec![
        scenario("BULL_RUN", "Bull Market Rally", "Markets are soaring!", "Increased volatility"),
        scenario("BEAR_CRASH", "Bear Market Crash", "Markets are plummeting!", "High risk environment"),
        scenario("SIDEWAYS", "Sideways Market", "Markets are stable", "Low volatility"),
    ]
}

/// The fixed power-up set every new player receives.
pub fn starter_power_ups() -> Vec<PowerUp> {
    vec![
        PowerUp::new(POWER_UP_RISK_SHIELD, "Risk Shield", "-20 Risk Score", 1),
        PowerUp::new(POWER_UP_BAILOUT, "Bailout", "+$1000 Cash", 1),
    ]
}

// =============================================================================
// AssetCatalog
// =============================================================================

/// A session's snapshot of the asset catalog, indexed by asset id.
///
/// Keeps assets in catalog order for display while providing O(1) lookup.
/// Serializes as the plain ordered asset list.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
    index: HashMap<AssetId, usize>,
}

impl AssetCatalog {
    /// Build a catalog from an ordered asset list.
    pub fn new(assets: Vec<Asset>) -> Self {
        let index = assets
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self { assets, index }
    }

    /// Fresh catalog snapshot from the seed table.
    pub fn seeded() -> Self {
        Self::new(seed_assets())
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.index.get(id).map(|&i| &self.assets[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Asset> {
        self.index.get(id).map(|&i| &mut self.assets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Asset> {
        self.assets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Serialize for AssetCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.assets.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_lookup() {
        let catalog = AssetCatalog::seeded();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("AAPL").unwrap().current_price, 150.0);
        assert_eq!(catalog.get("BTC").unwrap().asset_type, AssetType::Crypto);
        assert!(catalog.get("DOGE").is_none());
    }

    #[test]
    fn test_catalog_serializes_as_list() {
        let json = serde_json::to_value(AssetCatalog::seeded()).unwrap();
        let list = json.as_array().expect("catalog should serialize as a list");
        assert_eq!(list.len(), 4);
        assert_eq!(list[0]["id"], "AAPL");
    }

    #[test]
    fn test_reference_tables() {
        assert_eq!(avatars().len(), 4);
        assert_eq!(strategies().len(), 4);
        assert_eq!(scenarios().len(), 3);
        let power_ups = starter_power_ups();
        assert_eq!(power_ups.len(), 2);
        assert!(power_ups.iter().all(|p| p.uses_left == 1));
    }
}
