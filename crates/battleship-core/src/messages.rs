//! Status-message text queued for players.
//!
//! These are the lines shown under each player's boards. The queue for a
//! player is replaced wholesale at every game event, so each helper only
//! produces text; [`Game`](crate::game::Game) decides who gets what.

use crate::ids::GameId;
use crate::ship_class::ShipClass;

pub const WAITING_FOR_OPPONENT_TO_JOIN: &str = "Waiting for opponent to join.";
pub const YOUR_TURN_AFTER_JOIN: &str = "It's your turn to play.";
pub const YOUR_TURN: &str = "Your turn to play.";
pub const YOU_HIT: &str = "You have HIT a ship.";
pub const YOU_WERE_HIT: &str = "You have been hit.";
pub const YOU_MISSED: &str = "You missed.";
pub const ALL_ENEMY_SHIPS_DESTROYED: &str = "You have destroyed all your opponent's ships.";
pub const WINNER: &str = "You are the WINNER!";
pub const ALL_OWN_SHIPS_LOST: &str = "You have lost all your ships.";
pub const LOSER: &str = "You have lost the game.";
pub const INVALID_FIRING_POSITION: &str =
    "You have entered an invalid firing position. Try again.";

/// Path a second player follows to join `game_id`.
pub fn join_path(game_id: &GameId) -> String {
    format!("/join/{}", game_id)
}

pub fn invite(game_id: &GameId) -> String {
    format!("Invite opponent to {}.", join_path(game_id))
}

pub fn opponent_joined(joiner: &str) -> String {
    format!("{} has joined the game", joiner)
}

pub fn waiting_for(opponent: &str) -> String {
    format!("Waiting for {} to play.", opponent)
}

pub fn opponent_missed(shooter: &str) -> String {
    format!("{} has missed. No casualty.", shooter)
}

pub fn destroyed(class: ShipClass) -> String {
    format!("You have destroyed a {}.", class.name())
}

pub fn lost(class: ShipClass) -> String {
    format!("You have lost a {}.", class.name())
}
