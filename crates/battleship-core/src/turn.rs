//! Turn resolution: one shot from the player whose turn it is.
//!
//! The outcome depends only on the target cell and the opponent's
//! remaining fleet. All board and message updates are applied before the
//! opponent's signal is raised, so a woken stream always reads the
//! finished state.
//!
//! A repeated shot at an already-missed cell is resolved as an ordinary
//! miss again.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::board::ShotMark;
use crate::coordinate::Coordinate;
use crate::game::{Game, GameStatus};
use crate::ids::PlayerId;
use crate::messages;
use crate::ship::Ship;
use crate::ship_class::ShipClass;

/// Why a fire request changed nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The game is forming or already finished.
    NotActive,
    /// Another player fires next.
    NotYourTurn,
    /// The actor or their opponent is not seated in the game.
    UnknownPlayer,
}

/// What a resolved shot did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireReport {
    pub target: Coordinate,
    pub hit: bool,

    /// Class of the ship sunk by this shot, if any.
    pub destroyed: Option<ShipClass>,

    /// `true` if this shot sank the opponent's last ship.
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireResult {
    /// Stale or out-of-turn request; the caller just re-renders.
    Ignored(IgnoreReason),
    Resolved(FireReport),
}

impl Game {
    /// Resolve `actor`'s shot at `target`.
    pub fn fire(&mut self, actor: &PlayerId, target: Coordinate) -> FireResult {
        if self.status != GameStatus::Active {
            return FireResult::Ignored(IgnoreReason::NotActive);
        }
        if &self.next_to_play != actor {
            return FireResult::Ignored(IgnoreReason::NotYourTurn);
        }

        let (actor_name, opponent_id) = match self.players.get(actor) {
            Some(player) => match &player.opponent {
                Some(opponent) => (player.name.clone(), opponent.clone()),
                None => return FireResult::Ignored(IgnoreReason::UnknownPlayer),
            },
            None => return FireResult::Ignored(IgnoreReason::UnknownPlayer),
        };
        if !self.players.contains_key(&opponent_id) {
            return FireResult::Ignored(IgnoreReason::UnknownPlayer);
        }

        // Opponent side: fleet, own board and narration.
        let (hit, destroyed, game_over, opponent_name, signal) = {
            let Some(opponent) = self.players.get_mut(&opponent_id) else {
                return FireResult::Ignored(IgnoreReason::UnknownPlayer);
            };
            opponent.messages.clear();

            let strike = strike(&mut opponent.fleet, target);
            let hit = strike.is_some();
            let destroyed = strike.flatten();

            if hit {
                if let Some(mut cell) = opponent.board.get(target) {
                    cell.on_fire = true;
                    opponent.board.set(target, cell);
                }
                opponent.push_message(messages::YOU_WERE_HIT);
                if let Some(class) = destroyed {
                    opponent.push_message(messages::lost(class));
                }
            } else {
                opponent.push_message(messages::opponent_missed(&actor_name));
            }

            let game_over = opponent.is_defeated();
            if game_over {
                opponent.push_message(messages::ALL_OWN_SHIPS_LOST);
                opponent.push_message(messages::LOSER);
            } else {
                opponent.push_message(messages::YOUR_TURN);
            }

            (hit, destroyed, game_over, opponent.name.clone(), opponent.signal())
        };

        // Actor side: shots board and narration.
        if let Some(player) = self.players.get_mut(actor) {
            player.messages.clear();
            if hit {
                player.shots.set(target, ShotMark::Hit);
                player.push_message(messages::YOU_HIT);
                if let Some(class) = destroyed {
                    player.push_message(messages::destroyed(class));
                }
                if game_over {
                    player.push_message(messages::ALL_ENEMY_SHIPS_DESTROYED);
                    player.push_message(messages::WINNER);
                }
            } else {
                player.shots.set(target, ShotMark::Miss);
                player.push_message(messages::YOU_MISSED);
            }
            if !game_over {
                player.push_message(messages::waiting_for(&opponent_name));
            }
        }

        if game_over {
            self.status = GameStatus::Finished;
            info!(game_id = %self.id, winner = %actor_name, "game finished");
        } else {
            self.next_to_play = opponent_id;
        }

        debug!(
            game_id = %self.id,
            shooter = %actor_name,
            target = %target,
            hit,
            destroyed = destroyed.map(ShipClass::name),
            "shot resolved"
        );

        signal.raise();

        FireResult::Resolved(FireReport {
            target,
            hit,
            destroyed,
            game_over,
        })
    }
}

/// Remove the ship part at `target` from `fleet`.
///
/// Returns `None` on a miss, `Some(None)` on a hit, and
/// `Some(Some(class))` when the hit sank the ship (which is then dropped
/// from the fleet). Ships never overlap, so at most one part matches.
fn strike(fleet: &mut BTreeMap<usize, Ship>, target: Coordinate) -> Option<Option<ShipClass>> {
    let (slot, ship) = fleet.iter_mut().find(|(_, ship)| ship.occupies(target))?;
    let slot = *slot;
    ship.take_hit(target);

    if ship.is_destroyed() {
        let class = ship.class();
        fleet.remove(&slot);
        Some(Some(class))
    } else {
        Some(None)
    }
}
