//! Market-wide reference data: events, scenarios, sentiment, and the static
//! avatar/strategy records shown to players.

use crate::asset::AssetType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Sentiment
// =============================================================================

/// Per-asset-type sentiment bias, nominally in [-100, 100]. Positive values
/// drift prices of that type upward.
pub type Sentiment = HashMap<AssetType, i32>;

/// Neutral sentiment for every asset type.
pub fn default_sentiment() -> Sentiment {
    AssetType::ALL.iter().map(|t| (*t, 0)).collect()
}

// =============================================================================
// Market Events & Scenarios
// =============================================================================

/// A news event influencing prices while active. At most one per session.
///
/// Immutable once selected. The per-type impact is spread evenly over the
/// round's frames by the engine; the volatility multiplier scales the random
/// component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvent {
    pub id: String,
    pub headline: String,
    /// Total price impact per asset type over one round, as a fraction
    /// (e.g. 0.10 = +10%). Types absent from the map are unaffected.
    #[serde(default)]
    pub impact: HashMap<AssetType, f64>,
    /// Multiplier on the random movement while the event is active.
    #[serde(default)]
    pub volatility_multiplier: Option<f64>,
}

/// A match-wide scenario, chosen at random when the match starts.
/// Descriptive flavor for clients; at most one per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub effect_description: String,
}

// =============================================================================
// Avatars & Strategies (static reference records)
// =============================================================================

/// A selectable player avatar. Cosmetic plus a described effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effect_description: String,
}

/// A selectable play strategy. Some strategy ids carry mechanical effects
/// (risk discount, result bonus) applied by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub bonus_description: String,
    pub tooltip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentiment_covers_all_types() {
        let sentiment = default_sentiment();
        assert_eq!(sentiment.len(), 4);
        for t in AssetType::ALL {
            assert_eq!(sentiment[&t], 0);
        }
    }

    #[test]
    fn test_sentiment_wire_keys() {
        let json = serde_json::to_string(&default_sentiment()).unwrap();
        assert!(json.contains("\"STOCK\":0"));
        assert!(json.contains("\"ETF\":0"));
    }

    #[test]
    fn test_event_impact_defaults_empty() {
        let event: MarketEvent =
            serde_json::from_str(r#"{"id":"FED_CUT","headline":"Rates cut"}"#).unwrap();
        assert!(event.impact.is_empty());
        assert!(event.volatility_multiplier.is_none());
    }
}
