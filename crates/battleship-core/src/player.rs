//! A participant: fleet, boards, status messages and turn signal.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::board::{OwnBoard, OwnCell, ShotsBoard};
use crate::error::GameError;
use crate::ids::PlayerId;
use crate::placement::FleetPlacement;
use crate::ship::Ship;
use crate::signal::TurnSignal;

#[derive(Debug)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,

    /// Fleet slot -> ship still afloat. Destroyed ships are removed.
    pub(crate) fleet: BTreeMap<usize, Ship>,

    /// Own ship layout, with fire damage received.
    pub(crate) board: OwnBoard,

    /// Outcome of every shot this player fired.
    pub(crate) shots: ShotsBoard,

    /// Key into the game's player map; not an ownership relation.
    pub(crate) opponent: Option<PlayerId>,

    /// Narration for the player's current view, oldest first.
    pub(crate) messages: Vec<String>,

    /// Shared with the player's event stream.
    pub(crate) signal: Arc<TurnSignal>,
}

impl Player {
    /// Build a player from a validated placement.
    ///
    /// Fails only if a fresh id cannot be generated.
    pub fn new(name: impl Into<String>, placement: FleetPlacement) -> Result<Self, GameError> {
        let id = PlayerId::generate()?;
        Ok(Player::with_id(id, name, placement))
    }

    /// Build a player with a caller-chosen id.
    pub fn with_id(id: PlayerId, name: impl Into<String>, placement: FleetPlacement) -> Self {
        let fleet = placement.into_fleet();

        let mut board = OwnBoard::new();
        for part in fleet.values().flat_map(|ship| ship.parts()) {
            board.set(part.pos, OwnCell::intact(part.tag));
        }

        Player {
            id,
            name: name.into(),
            fleet,
            board,
            shots: ShotsBoard::new(),
            opponent: None,
            messages: Vec::new(),
            signal: Arc::new(TurnSignal::new()),
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fleet(&self) -> &BTreeMap<usize, Ship> {
        &self.fleet
    }

    pub fn board(&self) -> &OwnBoard {
        &self.board
    }

    pub fn shots(&self) -> &ShotsBoard {
        &self.shots
    }

    pub fn opponent(&self) -> Option<&PlayerId> {
        self.opponent.as_ref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Handle on the player's turn signal, for waiting outside the lock.
    pub fn signal(&self) -> Arc<TurnSignal> {
        Arc::clone(&self.signal)
    }

    /// `true` once every ship in the fleet has been destroyed.
    pub fn is_defeated(&self) -> bool {
        self.fleet.is_empty()
    }

    pub(crate) fn replace_messages<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
    }

    pub(crate) fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}
