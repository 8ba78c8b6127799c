//! Shared types for the battleship TCP server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected clients
//! - `Session`: the `(game, player)` pair a connection acts as
//! - `AppState`: everything a connection task needs, cheap to clone

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use battleship_core::{GameId, GameRegistry, PlayerId};
use tokio::sync::RwLock;

use crate::config::Config;

/// Identifier for a connected client.
///
/// Opaque; unique over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Which seat a connection speaks for.
///
/// Set by a successful create or join, cleared when the player leaves a
/// finished game, and restorable on another connection with `SESSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game: GameId,
    pub player: PlayerId,
}

/// Registry of connected clients.
///
/// - Key: `ClientId`
/// - Value: peer address, for logging.
pub type ConnectionRegistry = Arc<RwLock<HashMap<ClientId, SocketAddr>>>;

#[derive(Debug, Clone)]
pub struct AppState {
    pub games: GameRegistry,
    pub connections: ConnectionRegistry,
    pub max_clients: usize,
    pub keepalive: Duration,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            games: GameRegistry::new(config.max_games, config.game_timeout()),
            connections: Arc::new(RwLock::new(HashMap::new())),
            max_clients: config.max_clients,
            keepalive: config.keepalive(),
        }
    }
}
