//! Shared server state.
//!
//! Handlers receive a clone of [`ServerState`] via axum's State extractor.
//! The state owns nothing but a handle to the injected session registry;
//! all game state lives behind the registry's per-session locks.

use sim_core::SessionRegistry;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use types::EpochSecs;

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct ServerState {
    /// The session registry this server instance operates on.
    pub registry: Arc<SessionRegistry>,
}

impl ServerState {
    /// Create server state around an existing registry.
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(Arc::new(SessionRegistry::new()))
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
///
/// The single place where the server reads the clock; everything below the
/// HTTP layer takes `now` as an argument.
pub fn epoch_now() -> EpochSecs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
