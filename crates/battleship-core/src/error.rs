//! Error types for the game engine.
//!
//! Placement mistakes are not errors here: they are collected in a
//! [`FieldErrors`](crate::placement::FieldErrors) and handed back to the
//! submitter. A stale fire is not an error either; it resolves to
//! [`FireResult::Ignored`](crate::turn::FireResult).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The OS entropy source failed while generating an id.
    #[error("could not generate identifier: {0}")]
    Entropy(#[from] rand::Error),

    /// The registry already holds the configured maximum of games.
    #[error("too many games ({max}) in progress")]
    CapacityExceeded { max: usize },

    /// No game is registered under the requested id.
    #[error("no such game")]
    UnknownGame,

    /// The player id is not part of the game.
    #[error("player is not part of this game")]
    UnknownPlayer,

    /// A join was attempted on a game that is no longer forming.
    #[error("game is not waiting for an opponent")]
    NotForming,

    /// A join was attempted on a game that already has two players.
    #[error("game already has two players")]
    GameFull,
}
