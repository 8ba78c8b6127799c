//! 10x10 boards.
//!
//! Every cell is an explicit `Option`: `None` is an empty square, never a
//! zero value standing in for one.
//!
//! - [`OwnCell`]: a player's own ship segment, possibly on fire.
//! - [`ShotMark`]: the outcome of a shot the player fired.

use crate::coordinate::{Coordinate, BOARD_SIZE};
use crate::ship::PartTag;

/// A square grid of optional cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: [[Option<T>; BOARD_SIZE]; BOARD_SIZE],
}

impl<T: Copy> Grid<T> {
    /// An all-empty grid.
    pub fn new() -> Self {
        Grid {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, pos: Coordinate) -> Option<T> {
        self.cells[pos.row()][pos.col()]
    }

    pub fn set(&mut self, pos: Coordinate, value: T) {
        self.cells[pos.row()][pos.col()] = Some(value);
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<T>; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

impl<T: Copy> Default for Grid<T> {
    fn default() -> Self {
        Grid::new()
    }
}

/// One square of a player's own-ship board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnCell {
    pub tag: PartTag,
    pub on_fire: bool,
}

impl OwnCell {
    pub fn intact(tag: PartTag) -> Self {
        OwnCell {
            tag,
            on_fire: false,
        }
    }

    /// Renderer name: the segment tag, suffixed with `_fire` once hit.
    pub fn render(self) -> String {
        if self.on_fire {
            format!("{}_fire", self.tag.as_str())
        } else {
            self.tag.as_str().to_string()
        }
    }
}

/// Outcome recorded on the shooter's shots board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShotMark {
    Hit,
    Miss,
}

impl ShotMark {
    pub fn as_str(self) -> &'static str {
        match self {
            ShotMark::Hit => "hit_bomb",
            ShotMark::Miss => "splash",
        }
    }
}

pub type OwnBoard = Grid<OwnCell>;
pub type ShotsBoard = Grid<ShotMark>;
