//! Process-wide registry of games.
//!
//! - Key: [`GameId`] (random, also the invite token).
//! - Value: [`SharedGame`], the game behind its own lock.
//!
//! The map sits behind one coarse `RwLock`. Capacity is checked and the
//! new entry inserted under the same write guard, so concurrent creates
//! can never push the registry past its maximum. Every game gets a
//! one-shot expiry task that removes it when the timeout elapses,
//! whatever state it is in. Removing a game early aborts its timer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::error::GameError;
use crate::game::{Game, SharedGame};
use crate::ids::GameId;
use crate::player::Player;

/// A registered game and the timer that will reclaim it.
#[derive(Debug)]
struct Entry {
    game: SharedGame,
    expiry: AbortHandle,
}

type GameMap = Arc<RwLock<HashMap<GameId, Entry>>>;

/// Cloneable handle to the shared registry.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: GameMap,
    max_games: usize,
    game_timeout: Duration,
}

impl GameRegistry {
    pub fn new(max_games: usize, game_timeout: Duration) -> Self {
        GameRegistry {
            games: Arc::new(RwLock::new(HashMap::new())),
            max_games,
            game_timeout,
        }
    }

    pub fn max_games(&self) -> usize {
        self.max_games
    }

    pub fn game_timeout(&self) -> Duration {
        self.game_timeout
    }

    /// Number of registered games.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    /// `true` if no further game can be created right now.
    pub async fn is_full(&self) -> bool {
        self.len().await >= self.max_games
    }

    pub async fn get(&self, id: &GameId) -> Option<SharedGame> {
        self.games
            .read()
            .await
            .get(id)
            .map(|entry| Arc::clone(&entry.game))
    }

    /// Register a new forming game around `creator` and schedule its expiry.
    ///
    /// Rejected without side effects if the registry is full.
    pub async fn create(&self, creator: Player) -> Result<GameId, GameError> {
        let id = GameId::generate()?;
        let creator_name = creator.name().to_string();

        {
            let mut guard = self.games.write().await;
            if guard.len() >= self.max_games {
                warn!(max_games = self.max_games, "rejecting new game: registry full");
                return Err(GameError::CapacityExceeded {
                    max: self.max_games,
                });
            }
            let entry = Entry {
                game: Game::new(id.clone(), creator).into_shared(),
                expiry: self.schedule_expiry(id.clone()),
            };
            guard.insert(id.clone(), entry);
        }

        info!(game_id = %id, creator = %creator_name, "game created");
        Ok(id)
    }

    /// Remove a game and cancel its expiry, returning it if it was
    /// registered.
    pub async fn remove(&self, id: &GameId) -> Option<SharedGame> {
        let entry = self.games.write().await.remove(id)?;
        entry.expiry.abort();
        Some(entry.game)
    }

    /// Spawn the one-shot timer that reclaims `id` after the timeout.
    fn schedule_expiry(&self, id: GameId) -> AbortHandle {
        let games = Arc::clone(&self.games);
        let timeout = self.game_timeout;

        let task = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if games.write().await.remove(&id).is_some() {
                info!(game_id = %id, "removing game after timeout");
            }
        });
        task.abort_handle()
    }
}
