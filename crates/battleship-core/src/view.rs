//! Rendering snapshots.
//!
//! A [`PlayerView`] is copied out of a game while its lock is held, so a
//! renderer can format it after the lock is released.

use crate::board::Grid;
use crate::game::GameStatus;
use crate::ids::GameId;
use crate::player::Player;

/// One row of rendered cell names; `None` is an empty square.
pub type RenderedRow = Vec<Option<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub game_id: GameId,
    pub status: GameStatus,

    /// `true` when the game is active and the viewer fires next.
    pub my_turn: bool,

    pub opponent: Option<String>,

    /// Own ship layout with fire damage.
    pub board: Vec<RenderedRow>,

    /// Hits and misses the viewer has fired.
    pub shots: Vec<RenderedRow>,

    pub messages: Vec<String>,
}

impl PlayerView {
    pub(crate) fn capture(
        game_id: GameId,
        status: GameStatus,
        my_turn: bool,
        opponent: Option<String>,
        player: &Player,
    ) -> Self {
        PlayerView {
            game_id,
            status,
            my_turn,
            opponent,
            board: render(player.board(), |cell| cell.render()),
            shots: render(player.shots(), |mark| mark.as_str().to_string()),
            messages: player.messages().to_vec(),
        }
    }
}

fn render<T: Copy>(grid: &Grid<T>, name: impl Fn(T) -> String) -> Vec<RenderedRow> {
    grid.rows()
        .map(|row| row.iter().map(|cell| cell.map(&name)).collect())
        .collect()
}
