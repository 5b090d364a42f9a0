//! Axum application builder.
//!
//! Configures routes, middleware, and state for the game server.

use axum::Router;
use axum::routing::{get, post};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{game, health};
use crate::state::ServerState;

/// Create the axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    // CORS layer for browser clients.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Health endpoint
        .route("/api/health", get(health::health))
        // Game endpoints
        .route("/api/game/join", post(game::join))
        .route("/api/game/state", get(game::state))
        .route("/api/game/start", post(game::start))
        .route("/api/game/avatar", post(game::select_avatar))
        .route("/api/game/strategy", post(game::select_strategy))
        .route("/api/game/buy", post(game::buy))
        .route("/api/game/sell", post(game::sell))
        .route("/api/game/powerup", post(game::use_power_up))
        .route("/api/game/reset", post(game::reset))
        .route("/api/game/results", get(game::results))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Server configuration.
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".into(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("GAME_SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let host = std::env::var("GAME_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        Self { port, host }
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_create_app() {
        let _app = create_app(ServerState::default());
        // App created successfully
    }
}
