//! battleship-server
//!
//! Multi-client async TCP server for two-player battleship.

pub mod config;
pub mod types;
pub mod server;
pub mod client;

// these are internal modules, not re-exported
mod event_stream;
mod handlers;

pub use handlers::{
    Reply, CAPACITY_REACHED, GAME_FULL, INTERNAL_ERROR, NOT_A_PLAYER, NOT_YOUR_GAME, NO_SUCH_GAME,
};
