//! Session registry: process-wide map from game id to session.
//!
//! The registry is an explicitly owned object injected into whatever shell
//! hosts the game (the HTTP server, tests), never ambient global state, so
//! independent instances can coexist.
//!
//! Locking is two-level: the registry map has its own short-lived lock used
//! only to resolve or insert the session handle, and each session has one
//! exclusive lock guarding the entire aggregate. No cross-session ordering
//! exists; sessions are fully independent.

use crate::session::GameSession;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use types::{EpochSecs, GameId};

/// Shared handle to one session and its exclusive lock.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Map of live sessions keyed by game id, lazily creating on first reference.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<GameId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the session for `game_id`, creating a fresh pre-match session
    /// on first reference.
    pub fn session(&self, game_id: &str, now: EpochSecs) -> SessionHandle {
        let mut sessions = self.sessions.lock();
        sessions
            .entry(game_id.to_string())
            .or_insert_with(|| {
                info!(game = game_id, "creating session");
                Arc::new(Mutex::new(GameSession::new(game_id, now)))
            })
            .clone()
    }

    /// Replace the session for `game_id` with a fresh instance, discarding
    /// all player state.
    ///
    /// Callers still holding the old handle keep a functioning but orphaned
    /// session; operations against stale player ids on the new session fail
    /// with not-found errors.
    pub fn reset(&self, game_id: &str, now: EpochSecs) -> SessionHandle {
        let fresh: SessionHandle = Arc::new(Mutex::new(GameSession::new(game_id, now)));
        self.sessions
            .lock()
            .insert(game_id.to_string(), fresh.clone());
        info!(game = game_id, "session reset");
        fresh
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_creation_returns_same_session() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.session_count(), 0);

        let first = registry.session("default", 1000.0);
        let second = registry.session("default", 2000.0);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.session_count(), 1);

        let other = registry.session("room-2", 1000.0);
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(registry.session_count(), 2);
    }

    #[test]
    fn test_reset_replaces_session_and_orphans_players() {
        let registry = SessionRegistry::new();
        let session = registry.session("default", 1000.0);
        let player_id = session.lock().join("Alice", 1000.0).unwrap();

        let fresh = registry.reset("default", 2000.0);
        assert!(!Arc::ptr_eq(&session, &fresh));
        assert!(Arc::ptr_eq(&fresh, &registry.session("default", 3000.0)));

        // The stale player id is gone from the replacement session.
        assert!(fresh.lock().player(&player_id).is_err());
        // The orphaned handle still works in isolation.
        assert!(session.lock().player(&player_id).is_ok());
    }
}
