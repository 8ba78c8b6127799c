//! Random identifiers for games and players.
//!
//! Ids double as the invite link and the routing key, so they are drawn
//! from the OS entropy source and are never sequential.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::GameError;

/// Identifier of a game (also its invite / routing token).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(String);

/// Identifier of a player within a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

macro_rules! token_id {
    ($name:ident) => {
        impl $name {
            /// Draw a fresh random id.
            pub fn generate() -> Result<Self, GameError> {
                random_token().map($name)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

token_id!(GameId);
token_id!(PlayerId);

/// 16 random bytes rendered as a UUID-shaped hex string
/// (`8-4-4-4-12`).
fn random_token() -> Result<String, GameError> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;

    let hex = |range: std::ops::Range<usize>| -> String {
        bytes[range].iter().map(|b| format!("{:02x}", b)).collect()
    };
    Ok(format!(
        "{}-{}-{}-{}-{}",
        hex(0..4),
        hex(4..6),
        hex(6..8),
        hex(8..10),
        hex(10..16)
    ))
}
