//! Market engine: one-step stochastic price advancement and portfolio
//! revaluation.
//!
//! The engine approximates continuous drift through frequent external
//! polling; each call advances every price exactly once. It never loops to
//! catch up after a polling gap.

use crate::catalog::AssetCatalog;
use crate::risk;
use rand::Rng;
use types::{MarketEvent, Player, ROUND_SECS, Sentiment};

/// Scale of the uniform random movement before volatility weighting.
const RANDOM_MOVE_SCALE: f64 = 0.015;

/// Total sentiment drift over one full round at sentiment 100.
const SENTIMENT_DRIFT_PER_ROUND: f64 = 0.05;

/// Advance every asset's price by one step.
///
/// Per asset the relative change is the sum of:
/// - the active event's per-type impact spread over the round's frames,
/// - a uniform random movement in (-0.5, 0.5) scaled by base volatility and
///   the event's volatility multiplier,
/// - sentiment drift proportional to the type's sentiment level.
///
/// Prices are not floored: sustained negative sentiment or events can drift a
/// price toward or below zero. That is an intentional simplification of the
/// model, not a defect.
pub fn advance_prices(
    catalog: &mut AssetCatalog,
    active_event: Option<&MarketEvent>,
    sentiment: &Sentiment,
    rng: &mut impl Rng,
) {
    let frames = ROUND_SECS as f64;
    let vol_multiplier = active_event
        .and_then(|e| e.volatility_multiplier)
        .unwrap_or(1.0);

    for asset in catalog.iter_mut() {
        let mut change = 0.0;

        if let Some(event) = active_event {
            if let Some(impact) = event.impact.get(&asset.asset_type) {
                change += impact / frames;
            }
        }

        let random_movement =
            (rng.gen::<f64>() - 0.5) * RANDOM_MOVE_SCALE * asset.base_volatility * vol_multiplier;
        change += random_movement;

        let sentiment_level = sentiment.get(&asset.asset_type).copied().unwrap_or(0);
        change += (sentiment_level as f64 / 100.0) * (SENTIMENT_DRIFT_PER_ROUND / frames);

        asset.record_price(asset.current_price * (1.0 + change));
    }
}

/// Recompute every player's total value and risk score from current prices.
///
/// Each player is revalued independently from scratch; the result does not
/// depend on iteration order across players.
pub fn revalue_players(players: &mut [Player], catalog: &AssetCatalog) {
    for player in players.iter_mut() {
        let holdings_value: f64 = player
            .holdings
            .values()
            .filter_map(|h| catalog.get(&h.asset_id).map(|a| h.quantity * a.current_price))
            .sum();
        player.total_value = player.cash + holdings_value;
        player.risk_score = risk::risk_score(player, catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use types::{AssetType, HISTORY_CAP, Holding, default_sentiment};

    fn neutral_advance(catalog: &mut AssetCatalog, rng: &mut StdRng) {
        advance_prices(catalog, None, &default_sentiment(), rng);
    }

    #[test]
    fn test_advance_moves_every_price_once() {
        let mut catalog = AssetCatalog::seeded();
        let mut rng = StdRng::seed_from_u64(7);
        let before: Vec<f64> = catalog.iter().map(|a| a.current_price).collect();

        neutral_advance(&mut catalog, &mut rng);

        for (asset, old) in catalog.iter().zip(before) {
            assert_eq!(asset.history.len(), 2);
            assert_eq!(*asset.history.back().unwrap(), asset.current_price);
            // Movement stays within the volatility envelope.
            let max_move = 0.5 * 0.015 * asset.base_volatility;
            assert!((asset.current_price / old - 1.0).abs() <= max_move + 1e-12);
        }
    }

    #[test]
    fn test_history_capped_under_many_advances() {
        let mut catalog = AssetCatalog::seeded();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            neutral_advance(&mut catalog, &mut rng);
        }
        for asset in catalog.iter() {
            assert_eq!(asset.history.len(), HISTORY_CAP);
        }
    }

    #[test]
    fn test_event_impact_spread_over_frames() {
        let mut catalog = AssetCatalog::new(vec![types::Asset::new(
            "FLAT",
            "Zero Vol",
            AssetType::Stock,
            0.0,
            types::TrendBias::Sideways,
            100.0,
        )]);
        let event = MarketEvent {
            id: "RALLY".into(),
            headline: "Stocks rally".into(),
            impact: HashMap::from([(AssetType::Stock, 0.35)]),
            volatility_multiplier: None,
        };
        let mut rng = StdRng::seed_from_u64(0);

        advance_prices(&mut catalog, Some(&event), &default_sentiment(), &mut rng);

        // 0.35 impact over 35 frames = +1% per step; zero volatility means
        // the random term is exactly zero.
        let price = catalog.get("FLAT").unwrap().current_price;
        assert!((price - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_sentiment_can_drive_price_below_zero() {
        // No price floor: a pathological price near zero with huge negative
        // drift goes negative rather than clamping.
        let mut catalog = AssetCatalog::new(vec![types::Asset::new(
            "DOOM",
            "Doomed",
            AssetType::Crypto,
            0.0,
            types::TrendBias::Down,
            1e-6,
        )]);
        let sentiment: Sentiment = HashMap::from([(AssetType::Crypto, -100_000_000)]);
        let mut rng = StdRng::seed_from_u64(0);

        advance_prices(&mut catalog, None, &sentiment, &mut rng);

        assert!(catalog.get("DOOM").unwrap().current_price < 0.0);
    }

    #[test]
    fn test_revalue_marks_to_market() {
        let mut catalog = AssetCatalog::seeded();
        let mut player = Player::new("player-0-0", "Alice", vec![]);
        player.cash = 4_000.0;
        player.holdings.insert(
            "AAPL".into(),
            Holding { asset_id: "AAPL".into(), quantity: 10.0, avg_buy_price: 150.0 },
        );
        let mut players = vec![player];

        revalue_players(&mut players, &catalog);
        assert_eq!(players[0].total_value, 4_000.0 + 10.0 * 150.0);

        catalog.get_mut("AAPL").unwrap().record_price(200.0);
        revalue_players(&mut players, &catalog);
        assert_eq!(players[0].total_value, 4_000.0 + 10.0 * 200.0);
    }
}
