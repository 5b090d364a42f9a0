//! Risk scoring: volatility-weighted portfolio exposure on a 0-100 scale.

use crate::catalog::{AssetCatalog, STRATEGY_SAFETY_FIRST};
use types::Player;

/// Multiplier turning a value-weighted volatility average into the raw score.
const RISK_WEIGHT: f64 = 500.0;

/// Discount applied to players on the SAFETY_FIRST strategy.
const SAFETY_FIRST_DISCOUNT: u32 = 10;

/// Compute a player's risk score from holdings and current prices.
///
/// Each holding contributes its mark-to-market weight times the asset's base
/// volatility; the score is the value-weighted volatility normalized to
/// [0, 100]. An empty portfolio scores 0.
///
/// Always recomputed from scratch rather than maintained incrementally, so
/// repeated revaluation cannot drift from floating-point accumulation.
pub fn risk_score(player: &Player, catalog: &AssetCatalog) -> u32 {
    let mut total_contribution = 0.0;
    let mut total_weight = 0.0;

    for holding in player.holdings.values() {
        if let Some(asset) = catalog.get(&holding.asset_id) {
            let weight = holding.quantity * asset.current_price;
            total_weight += weight;
            total_contribution += weight * asset.base_volatility * RISK_WEIGHT;
        }
    }

    if total_weight <= 0.0 {
        return 0;
    }

    let score = (total_contribution / total_weight * 100.0).round().min(100.0) as u32;
    if player.has_strategy(STRATEGY_SAFETY_FIRST) {
        score.saturating_sub(SAFETY_FIRST_DISCOUNT)
    } else {
        score
    }
}
