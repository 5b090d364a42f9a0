//! Game lifecycle and trading endpoints.
//!
//! Every handler follows the same shape: resolve the session by game id
//! (creating it on first reference), take the session's exclusive lock, apply
//! one logical operation, and return the serialized state. The `gameId` field
//! defaults to `"default"` everywhere, so single-lobby clients can omit it.
//!
//! `GET /api/game/state` is the pull-based driver of the whole simulation:
//! polling it advances the round clock and, inside the trading window, the
//! market. No other background mechanism moves time forward.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use sim_core::{GameSession, PlayerResult};
use types::{GameId, PlayerId};

use crate::error::AppResult;
use crate::state::{ServerState, epoch_now};

fn default_game_id() -> GameId {
    "default".to_string()
}

fn default_amount() -> f64 {
    1.0
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body for `POST /api/game/join`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
    pub name: String,
}

/// Response for `POST /api/game/join`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub game_state: GameSession,
}

/// Query string carrying just a game id (`state`, `results`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameQuery {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
}

/// Body carrying just a game id (`start`, `reset`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
}

/// Body for `POST /api/game/avatar`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAvatarRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub avatar_id: String,
}

/// Body for `POST /api/game/strategy`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectStrategyRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub strategy_id: String,
}

/// Body for `POST /api/game/buy` and `POST /api/game/sell`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub asset_id: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
}

/// Body for `POST /api/game/powerup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpRequest {
    #[serde(default = "default_game_id")]
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub power_up_id: String,
}

/// Response for mutating trade operations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    pub game_state: GameSession,
}

// =============================================================================
// Handlers
// =============================================================================

/// Join a game: `POST /api/game/join`
pub async fn join(
    State(state): State<ServerState>,
    Json(req): Json<JoinRequest>,
) -> AppResult<Json<JoinResponse>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    let player_id = session.join(&req.name, now)?;
    Ok(Json(JoinResponse {
        player_id,
        game_id: req.game_id,
        game_state: session.clone(),
    }))
}

/// Poll game state: `GET /api/game/state`
///
/// Side-effecting: advances the round clock and possibly the market.
pub async fn state(
    State(state): State<ServerState>,
    Query(query): Query<GameQuery>,
) -> Json<GameSession> {
    let now = epoch_now();
    let session = state.registry.session(&query.game_id, now);
    let mut session = session.lock();
    session.tick(now);
    Json(session.clone())
}

/// Start the match: `POST /api/game/start` (idempotent)
pub async fn start(
    State(state): State<ServerState>,
    Json(req): Json<GameRequest>,
) -> Json<GameSession> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.start(now);
    Json(session.clone())
}

/// Select an avatar: `POST /api/game/avatar`
pub async fn select_avatar(
    State(state): State<ServerState>,
    Json(req): Json<SelectAvatarRequest>,
) -> AppResult<Json<GameSession>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.select_avatar(&req.player_id, &req.avatar_id, now)?;
    Ok(Json(session.clone()))
}

/// Select a strategy: `POST /api/game/strategy`
pub async fn select_strategy(
    State(state): State<ServerState>,
    Json(req): Json<SelectStrategyRequest>,
) -> AppResult<Json<GameSession>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.select_strategy(&req.player_id, &req.strategy_id, now)?;
    Ok(Json(session.clone()))
}

/// Buy an asset: `POST /api/game/buy`
pub async fn buy(
    State(state): State<ServerState>,
    Json(req): Json<TradeRequest>,
) -> AppResult<Json<ActionResponse>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.buy(&req.player_id, &req.asset_id, req.amount, now)?;
    Ok(Json(ActionResponse { success: true, game_state: session.clone() }))
}

/// Sell an asset: `POST /api/game/sell`
pub async fn sell(
    State(state): State<ServerState>,
    Json(req): Json<TradeRequest>,
) -> AppResult<Json<ActionResponse>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.sell(&req.player_id, &req.asset_id, req.amount, now)?;
    Ok(Json(ActionResponse { success: true, game_state: session.clone() }))
}

/// Use a power-up: `POST /api/game/powerup`
pub async fn use_power_up(
    State(state): State<ServerState>,
    Json(req): Json<PowerUpRequest>,
) -> AppResult<Json<ActionResponse>> {
    let now = epoch_now();
    let session = state.registry.session(&req.game_id, now);
    let mut session = session.lock();
    session.use_power_up(&req.player_id, &req.power_up_id, now)?;
    Ok(Json(ActionResponse { success: true, game_state: session.clone() }))
}

/// Reset the game: `POST /api/game/reset`
///
/// Destructive replace-in-place: all players and history are discarded.
pub async fn reset(
    State(state): State<ServerState>,
    Json(req): Json<GameRequest>,
) -> Json<GameSession> {
    let now = epoch_now();
    let session = state.registry.reset(&req.game_id, now);
    let session = session.lock();
    Json(session.clone())
}

/// Final rankings: `GET /api/game/results`
///
/// Fails with 400 until the match is finished.
pub async fn results(
    State(state): State<ServerState>,
    Query(query): Query<GameQuery>,
) -> AppResult<Json<Vec<PlayerResult>>> {
    let now = epoch_now();
    let session = state.registry.session(&query.game_id, now);
    let session = session.lock();
    let ranked = sim_core::results(&session)?;
    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_defaults_game_id() {
        let req: JoinRequest = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(req.game_id, "default");
        assert_eq!(req.name, "Alice");
    }

    #[test]
    fn test_trade_request_defaults_amount() {
        let json = r#"{"gameId": "room-1", "playerId": "player-0-1", "assetId": "AAPL"}"#;
        let req: TradeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.game_id, "room-1");
        assert_eq!(req.amount, 1.0);
    }

    #[test]
    fn test_power_up_request_wire_names() {
        let json = r#"{"playerId": "player-0-1", "powerUpId": "future-glimpse"}"#;
        let req: PowerUpRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.power_up_id, "future-glimpse");
    }

    #[test]
    fn test_action_response_serialization() {
        let response = ActionResponse {
            success: true,
            game_state: GameSession::with_seed("default", 1000.0, 1),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"gameState\""));
        assert!(json.contains("\"phase\":\"PRE_MATCH\""));
    }
}
