//! Route handlers for the game server.
//!
//! # Modules
//!
//! - [`health`]: Health check endpoint
//! - [`game`]: Game lifecycle and trading endpoints

pub mod game;
pub mod health;
