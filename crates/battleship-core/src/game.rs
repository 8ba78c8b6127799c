//! The game aggregate: two players, whose turn it is, and lifecycle status.
//!
//! A `Game` is plain data; callers share it as a [`SharedGame`] and hold
//! its lock for every read-modify-write sequence, including rendering
//! reads. Fire resolution lives in [`crate::turn`].
//!
//! Lifecycle:
//! - `Forming`: created with the first player, who is NextToPlay.
//! - `Active`: a second player joined; the creator fires first.
//! - `Finished`: one fleet is gone. Players detach one by one as they
//!   view the result.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::error::GameError;
use crate::ids::{GameId, PlayerId};
use crate::messages;
use crate::player::Player;
use crate::view::PlayerView;

/// A game behind its per-game mutual-exclusion lock.
pub type SharedGame = Arc<Mutex<Game>>;

/// Lifecycle status. The numeric codes are what renderers see.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Forming,
    Active,
    Finished,
}

impl GameStatus {
    pub fn code(self) -> u8 {
        match self {
            GameStatus::Forming => 0,
            GameStatus::Active => 1,
            GameStatus::Finished => 2,
        }
    }
}

#[derive(Debug)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) status: GameStatus,
    pub(crate) next_to_play: PlayerId,
    pub(crate) players: HashMap<PlayerId, Player>,
}

impl Game {
    /// Open a new game around its creator.
    ///
    /// The creator is NextToPlay from the start and is told where to send
    /// the opponent.
    pub fn new(id: GameId, mut creator: Player) -> Self {
        creator.replace_messages([
            messages::invite(&id),
            messages::WAITING_FOR_OPPONENT_TO_JOIN.to_string(),
        ]);

        let next_to_play = creator.id.clone();
        let mut players = HashMap::new();
        players.insert(creator.id.clone(), creator);

        Game {
            id,
            status: GameStatus::Forming,
            next_to_play,
            players,
        }
    }

    /// Wrap the game in its lock.
    pub fn into_shared(self) -> SharedGame {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn next_to_play(&self) -> &PlayerId {
        &self.next_to_play
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Name of the player waiting in a forming game.
    pub fn host_name(&self) -> Option<&str> {
        match self.status {
            GameStatus::Forming => self.players.values().next().map(|p| p.name()),
            _ => None,
        }
    }

    /// Whether a second player may still join.
    pub fn can_join(&self) -> bool {
        self.status == GameStatus::Forming && self.players.len() < 2
    }

    /// Seat the second player and start play.
    ///
    /// Links both players as opponents, replaces both message queues,
    /// moves to `Active`, and signals the creator that it is their turn.
    pub fn join(&mut self, mut joiner: Player) -> Result<(), GameError> {
        if self.status != GameStatus::Forming {
            return Err(GameError::NotForming);
        }
        if self.players.len() >= 2 {
            return Err(GameError::GameFull);
        }

        let creator = self
            .players
            .get_mut(&self.next_to_play)
            .ok_or(GameError::UnknownPlayer)?;

        creator.opponent = Some(joiner.id.clone());
        joiner.opponent = Some(creator.id.clone());

        joiner.replace_messages([messages::waiting_for(&creator.name)]);
        creator.replace_messages([
            messages::opponent_joined(&joiner.name),
            messages::YOUR_TURN_AFTER_JOIN.to_string(),
        ]);

        creator.signal.raise();

        info!(
            game_id = %self.id,
            creator = %creator.name,
            joiner = %joiner.name,
            "player joined, game active"
        );

        self.players.insert(joiner.id.clone(), joiner);
        self.status = GameStatus::Active;
        Ok(())
    }

    /// Tell `player_id` their last fire request was not a valid cell.
    ///
    /// No state other than the player's queue changes; the turn stays
    /// with them.
    pub fn note_invalid_fire(&mut self, player_id: &PlayerId) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.push_message(messages::INVALID_FIRING_POSITION);
        }
    }

    /// Detach a player, returning them if they were seated.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Option<Player> {
        self.players.remove(player_id)
    }

    /// Read-only snapshot of the game from `player_id`'s seat.
    pub fn view(&self, player_id: &PlayerId) -> Option<PlayerView> {
        let player = self.players.get(player_id)?;
        let opponent = player
            .opponent
            .as_ref()
            .and_then(|id| self.players.get(id))
            .map(|p| p.name.clone());

        Some(PlayerView::capture(
            self.id.clone(),
            self.status,
            self.status == GameStatus::Active && self.next_to_play == player.id,
            opponent,
            player,
        ))
    }
}
