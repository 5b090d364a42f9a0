//! Market Rush - round-based multiplayer trading game server.
//!
//! Serves the game API over HTTP. There is no background simulation loop:
//! the match clock and market prices advance lazily whenever clients poll
//! `GET /api/game/state`, so an idle server does no work.

use clap::Parser;
use server::{ServerConfig, ServerState, create_app};
use sim_core::SessionRegistry;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Market Rush - trading game server
#[derive(Parser, Debug)]
#[command(name = "market-rush")]
#[command(about = "A round-based multiplayer trading game server")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "GAME_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "GAME_SERVER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let registry = Arc::new(SessionRegistry::new());
    let app = create_app(ServerState::new(registry));

    let addr = config.bind_addr();
    info!(%addr, "starting game server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
