//! battleship-core
//!
//! Pure game engine for two-player battleship:
//! - coordinates, ship classes, ships and boards
//! - geometric placement validation
//! - players and the game aggregate
//! - turn resolution (hit / miss / sink / win)
//! - single-slot turn signal
//! - game registry with capacity and timed expiry

pub mod coordinate;
pub mod ship_class;
pub mod ship;
pub mod board;
pub mod placement;
pub mod ids;
pub mod messages;
pub mod signal;
pub mod player;
pub mod game;
pub mod turn;
pub mod view;
pub mod registry;
pub mod error;

pub use coordinate::{Coordinate, CoordinateError, BOARD_SIZE};
pub use ship_class::{ShipClass, FLEET};
pub use ship::{PartTag, Ship, ShipPart};
pub use board::{Grid, OwnBoard, OwnCell, ShotMark, ShotsBoard};
pub use placement::{validate_fleet, FieldErrors, FleetPlacement};
pub use ids::{GameId, PlayerId};
pub use signal::TurnSignal;
pub use player::Player;
pub use game::{Game, GameStatus, SharedGame};
pub use turn::{FireReport, FireResult, IgnoreReason};
pub use view::PlayerView;
pub use registry::GameRegistry;
pub use error::GameError;
