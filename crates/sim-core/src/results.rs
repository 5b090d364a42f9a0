//! Post-match ranking: ROI and risk-adjusted scores.

use crate::catalog::STRATEGY_DIVERSIFIER;
use crate::error::{GameError, Result};
use crate::session::GameSession;
use serde::Serialize;
use std::cmp::Ordering;
use types::{Phase, Player, PlayerId, STARTING_CASH};

/// Fraction of the risk score subtracted from ROI for ranking.
const RISK_PENALTY: f64 = 0.5;

/// Final value bonus for diversified portfolios (4+ distinct assets).
const DIVERSIFIER_BONUS: f64 = 0.05;
const DIVERSIFIER_MIN_ASSETS: usize = 4;

/// Narrative feedback attached to each result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub what_you_did_well: Vec<String>,
    pub mistakes_and_opportunities: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

/// One player's final standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub player_name: String,
    pub final_value: f64,
    pub risk_score: u32,
    /// Return on the starting cash, in percent.
    pub roi: f64,
    /// ROI minus a penalty proportional to the risk score; the ranking key.
    pub risk_adjusted_score: f64,
    /// 1-based rank, best first.
    pub rank: u32,
    pub insights: Vec<String>,
    pub player_summary: PlayerSummary,
    pub learning_cards: Vec<String>,
}

/// Rank all players of a finished match.
///
/// Fails with [`GameError::NotFinished`] before the match is over. Results
/// are sorted descending by risk-adjusted score; ties preserve join order
/// (stable sort), and ranks run 1..N in sorted position.
pub fn results(session: &GameSession) -> Result<Vec<PlayerResult>> {
    if session.phase != Phase::Finished {
        return Err(GameError::NotFinished(session.phase));
    }

    let mut results: Vec<PlayerResult> = session.players.iter().map(score_player).collect();
    results.sort_by(|a, b| {
        b.risk_adjusted_score
            .partial_cmp(&a.risk_adjusted_score)
            .unwrap_or(Ordering::Equal)
    });
    for (position, result) in results.iter_mut().enumerate() {
        result.rank = position as u32 + 1;
    }
    Ok(results)
}

fn score_player(player: &Player) -> PlayerResult {
    let mut final_value = player.total_value;
    // One-time diversification bonus, applied to the final value only.
    if player.has_strategy(STRATEGY_DIVERSIFIER)
        && player.distinct_holdings() >= DIVERSIFIER_MIN_ASSETS
    {
        final_value += final_value * DIVERSIFIER_BONUS;
    }

    let roi = (final_value - STARTING_CASH) / STARTING_CASH * 100.0;
    let risk_adjusted_score = roi - player.risk_score as f64 * RISK_PENALTY;

    PlayerResult {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        final_value,
        risk_score: player.risk_score,
        roi,
        risk_adjusted_score,
        rank: 0,
        insights: vec!["Great job!".into(), "Keep learning!".into()],
        player_summary: PlayerSummary {
            what_you_did_well: vec!["You participated actively".into()],
            mistakes_and_opportunities: vec!["Consider diversifying more".into()],
            improvement_suggestions: vec!["Try different strategies".into()],
        },
        learning_cards: Vec::new(),
    }
}
