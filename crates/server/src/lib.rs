//! Server crate: the axum HTTP shell over the game engine.
//!
//! The HTTP layer is a thin collaborator: every handler resolves a session
//! through the injected [`sim_core::SessionRegistry`], takes the session's
//! exclusive lock, applies one logical operation, and serializes the
//! resulting state. Time progression is pull-based — polling
//! `GET /api/game/state` is what advances the clock and the market; there are
//! no background tasks.
//!
//! # Modules
//!
//! - [`app`]: Router setup, CORS/trace middleware, server config
//! - [`state`]: Shared handler state (registry handle, wall clock)
//! - [`error`]: Unified error handling with HTTP status codes
//! - [`routes`]: HTTP route handlers (health, game)

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{ServerConfig, create_app};
pub use error::{AppError, AppResult};
pub use state::ServerState;
