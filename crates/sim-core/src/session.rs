//! Game session: the mutable aggregate for one match.
//!
//! A session owns its asset catalog snapshot, players, clock fields,
//! sentiment, and RNG. All fields are causally related (a price update
//! changes total values which change risk scores), so the whole aggregate is
//! guarded by a single exclusive lock held by the registry; every operation
//! here assumes it runs with that lock held and performs its full
//! read-decide-write without yielding.

use crate::catalog::{self, AssetCatalog, POWER_UP_BAILOUT, POWER_UP_RISK_SHIELD};
use crate::clock::{self, ClockStep};
use crate::engine;
use crate::error::{GameError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};
use types::{
    EpochSecs, GAME_ROUNDS, GameId, Holding, MarketEvent, Phase, Player, PlayerId, ROUND_SECS,
    Scenario, Sentiment, SubPhase, TradeSide, TransactionRecord, default_sentiment,
};

/// One independent match instance.
///
/// Serializes to the full game state snapshot sent to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: GameId,
    /// Players in join order.
    pub players: Vec<Player>,
    pub assets: AssetCatalog,
    pub current_round: u32,
    pub max_rounds: u32,
    pub active_event: Option<MarketEvent>,
    pub phase: Phase,
    pub sub_phase: SubPhase,
    pub time_remaining: u32,
    pub active_scenario: Option<Scenario>,
    pub sentiment: Sentiment,
    pub round_start_time: Option<EpochSecs>,
    pub last_update: EpochSecs,
    #[serde(skip)]
    rng: StdRng,
    #[serde(skip)]
    player_index: HashMap<PlayerId, usize>,
}

impl GameSession {
    /// Create a fresh pre-match session.
    pub fn new(id: impl Into<GameId>, now: EpochSecs) -> Self {
        Self::with_rng(id, now, StdRng::from_entropy())
    }

    /// Create a session with a seeded RNG, for deterministic tests.
    pub fn with_seed(id: impl Into<GameId>, now: EpochSecs, seed: u64) -> Self {
        Self::with_rng(id, now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: impl Into<GameId>, now: EpochSecs, rng: StdRng) -> Self {
        Self {
            id: id.into(),
            players: Vec::new(),
            assets: AssetCatalog::seeded(),
            current_round: 0,
            max_rounds: GAME_ROUNDS,
            active_event: None,
            phase: Phase::PreMatch,
            sub_phase: SubPhase::Intro,
            time_remaining: 0,
            active_scenario: None,
            sentiment: default_sentiment(),
            round_start_time: None,
            last_update: now,
            rng,
            player_index: HashMap::new(),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Resolve a player by id.
    pub fn player(&self, player_id: &str) -> Result<&Player> {
        self.player_index
            .get(player_id)
            .map(|&i| &self.players[i])
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))
    }

    fn player_mut(&mut self, player_id: &str) -> Result<&mut Player> {
        match self.player_index.get(player_id) {
            Some(&i) => Ok(&mut self.players[i]),
            None => Err(GameError::PlayerNotFound(player_id.to_string())),
        }
    }

    fn require_playing(&self) -> Result<()> {
        if self.phase != Phase::Playing {
            return Err(GameError::WrongPhase { required: Phase::Playing, actual: self.phase });
        }
        Ok(())
    }

    // =========================================================================
    // Lobby Operations
    // =========================================================================

    /// Join the session by display name.
    ///
    /// Idempotent: a name already present returns the existing player's id.
    /// New player ids combine join order and timestamp so ids never collide
    /// across a reset.
    pub fn join(&mut self, name: &str, now: EpochSecs) -> Result<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        if let Some(existing) = self.players.iter().find(|p| p.name == name) {
            return Ok(existing.id.clone());
        }

        let player_id = format!("player-{}-{}", self.players.len(), now as u64);
        let player = Player::new(player_id.clone(), name, catalog::starter_power_ups());
        self.player_index.insert(player_id.clone(), self.players.len());
        self.players.push(player);
        self.last_update = now;
        info!(game = %self.id, player = %player_id, %name, "player joined");
        Ok(player_id)
    }

    /// Set a player's avatar.
    pub fn select_avatar(&mut self, player_id: &str, avatar_id: &str, now: EpochSecs) -> Result<()> {
        self.player_mut(player_id)?.avatar_id = Some(avatar_id.to_string());
        self.last_update = now;
        Ok(())
    }

    /// Set a player's strategy.
    pub fn select_strategy(
        &mut self,
        player_id: &str,
        strategy_id: &str,
        now: EpochSecs,
    ) -> Result<()> {
        self.player_mut(player_id)?.strategy_id = Some(strategy_id.to_string());
        self.last_update = now;
        Ok(())
    }

    // =========================================================================
    // Clock Operations
    // =========================================================================

    /// Start the match.
    ///
    /// Only effective from `PRE_MATCH`; a no-op in any other phase, so
    /// repeated start calls are idempotent. Picks the match scenario
    /// uniformly at random.
    pub fn start(&mut self, now: EpochSecs) {
        if self.phase != Phase::PreMatch {
            return;
        }

        self.phase = Phase::Playing;
        self.current_round = 1;
        self.round_start_time = Some(now);
        self.time_remaining = ROUND_SECS;
        self.active_scenario = catalog::scenarios().choose(&mut self.rng).cloned();
        self.sub_phase = clock::sub_phase(self.phase, self.time_remaining);
        self.last_update = now;
        info!(
            game = %self.id,
            scenario = self.active_scenario.as_ref().map(|s| s.id.as_str()),
            "match started"
        );
    }

    /// Advance the session clock to `now`.
    ///
    /// Applies at most one market step per call regardless of the elapsed
    /// gap, and performs round advancement exactly once per boundary (the
    /// caller holds the session lock for the whole call).
    pub fn tick(&mut self, now: EpochSecs) {
        let step = clock::step(
            self.phase,
            self.round_start_time,
            self.current_round,
            self.max_rounds,
            now,
        );
        match step {
            ClockStep::Idle => {}
            ClockStep::Running { remaining, market_open } => {
                self.time_remaining = remaining;
                if market_open {
                    self.advance_market();
                }
                self.sub_phase = clock::sub_phase(self.phase, remaining);
            }
            ClockStep::NextRound => {
                // The expiring poll still moves prices: remaining hit zero
                // inside the open-market window.
                self.advance_market();
                self.current_round += 1;
                self.round_start_time = Some(now);
                self.time_remaining = ROUND_SECS;
                self.sub_phase = clock::sub_phase(self.phase, self.time_remaining);
                info!(game = %self.id, round = self.current_round, "round started");
            }
            ClockStep::MatchOver => {
                self.advance_market();
                self.phase = Phase::Finished;
                self.sub_phase = SubPhase::Results;
                self.time_remaining = 0;
                self.round_start_time = None;
                info!(game = %self.id, "match finished");
            }
        }
    }

    fn advance_market(&mut self) {
        engine::advance_prices(
            &mut self.assets,
            self.active_event.as_ref(),
            &self.sentiment,
            &mut self.rng,
        );
        engine::revalue_players(&mut self.players, &self.assets);
    }

    // =========================================================================
    // Portfolio Ledger
    // =========================================================================

    /// Buy `amount` units of an asset at the current price.
    pub fn buy(
        &mut self,
        player_id: &str,
        asset_id: &str,
        amount: f64,
        now: EpochSecs,
    ) -> Result<()> {
        self.require_playing()?;
        if !(amount > 0.0) {
            return Err(GameError::InvalidAmount(amount));
        }
        let (price, asset_type) = {
            let asset = self
                .assets
                .get(asset_id)
                .ok_or_else(|| GameError::AssetNotFound(asset_id.to_string()))?;
            (asset.current_price, asset.asset_type)
        };
        let record = self.transaction(TradeSide::Buy, asset_id, asset_type, amount, price);

        let player = self.player_mut(player_id)?;
        let cost = amount * price;
        if cost > player.cash {
            return Err(GameError::InsufficientFunds { needed: cost, available: player.cash });
        }

        player.cash -= cost;
        match player.holdings.get_mut(asset_id) {
            Some(holding) => {
                // Volume-weighted average buy price across all buys.
                let total_cost = holding.quantity * holding.avg_buy_price + cost;
                holding.quantity += amount;
                holding.avg_buy_price = total_cost / holding.quantity;
            }
            None => {
                player.holdings.insert(
                    asset_id.to_string(),
                    Holding { asset_id: asset_id.to_string(), quantity: amount, avg_buy_price: price },
                );
            }
        }
        player.transaction_log.push(record);
        self.last_update = now;
        debug!(game = %self.id, player = player_id, asset = asset_id, amount, price, "buy");
        Ok(())
    }

    /// Sell `amount` units of an asset at the current price.
    ///
    /// Removes the holding entirely when the quantity reaches zero. The
    /// average buy price is never recomputed on sell.
    pub fn sell(
        &mut self,
        player_id: &str,
        asset_id: &str,
        amount: f64,
        now: EpochSecs,
    ) -> Result<()> {
        self.require_playing()?;
        if !(amount > 0.0) {
            return Err(GameError::InvalidAmount(amount));
        }
        let (price, asset_type) = {
            let asset = self
                .assets
                .get(asset_id)
                .ok_or_else(|| GameError::AssetNotFound(asset_id.to_string()))?;
            (asset.current_price, asset.asset_type)
        };
        let record = self.transaction(TradeSide::Sell, asset_id, asset_type, amount, price);

        let player = self.player_mut(player_id)?;
        let held = player.holdings.get(asset_id).map_or(0.0, |h| h.quantity);
        if held < amount {
            return Err(GameError::InsufficientHoldings { requested: amount, held });
        }

        player.cash += amount * price;
        let mut emptied = false;
        if let Some(holding) = player.holdings.get_mut(asset_id) {
            holding.quantity -= amount;
            emptied = holding.quantity <= 0.0;
        }
        if emptied {
            player.holdings.remove(asset_id);
        }
        player.transaction_log.push(record);
        self.last_update = now;
        debug!(game = %self.id, player = player_id, asset = asset_id, amount, price, "sell");
        Ok(())
    }

    /// Consume one use of a player's power-up and apply its effect.
    ///
    /// Power-up ids present on the player but carrying no known effect are
    /// still consumed as a no-op decrement.
    pub fn use_power_up(&mut self, player_id: &str, power_up_id: &str, now: EpochSecs) -> Result<()> {
        let player = self.player_mut(player_id)?;
        let power_up = player
            .power_ups
            .iter_mut()
            .find(|p| p.id == power_up_id)
            .filter(|p| p.uses_left > 0)
            .ok_or_else(|| GameError::PowerUpUnavailable(power_up_id.to_string()))?;
        power_up.uses_left -= 1;

        match power_up_id {
            POWER_UP_RISK_SHIELD => player.risk_score = player.risk_score.saturating_sub(20),
            POWER_UP_BAILOUT => player.cash += 1000.0,
            _ => {}
        }
        self.last_update = now;
        debug!(game = %self.id, player = player_id, power_up = power_up_id, "power-up used");
        Ok(())
    }

    fn transaction(
        &self,
        side: TradeSide,
        asset_id: &str,
        asset_type: types::AssetType,
        amount: f64,
        price: f64,
    ) -> TransactionRecord {
        TransactionRecord {
            round: self.current_round,
            side,
            asset_id: asset_id.to_string(),
            asset_type,
            amount,
            price,
            total_value: amount * price,
            event_active: self.active_event.as_ref().map(|e| e.id.clone()),
            sentiment_at_time: self.sentiment.get(&asset_type).copied().unwrap_or(0),
        }
    }
}
