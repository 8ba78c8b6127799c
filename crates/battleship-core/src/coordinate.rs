//! Grid coordinates.
//!
//! A cell is addressed by `(row, col)`, each in `0..BOARD_SIZE`. At the
//! boundary a cell travels as a two-digit decimal code `rc`
//! (`row = rc / 10`, `col = rc % 10`), so `"00"` is the top-left cell and
//! `"99"` the bottom-right one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of rows (and columns) on every board.
pub const BOARD_SIZE: usize = 10;

/// Largest valid two-digit cell code.
pub const MAX_CODE: u8 = 99;

/// A single cell on a 10x10 board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

/// Why a cell code could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// The token was not a decimal integer.
    #[error("{0:?} is not a number")]
    NotANumber(String),

    /// The number was outside `0..=99`.
    #[error("{0} is off the board")]
    OutOfRange(u32),
}

impl Coordinate {
    /// Build a coordinate from its row and column, if both are on the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Coordinate { row, col })
        } else {
            None
        }
    }

    /// Decode a two-digit cell code (`0..=99`).
    pub fn from_code(code: u8) -> Result<Self, CoordinateError> {
        if code > MAX_CODE {
            return Err(CoordinateError::OutOfRange(code as u32));
        }
        Ok(Coordinate {
            row: code / 10,
            col: code % 10,
        })
    }

    /// The two-digit decimal code for this cell.
    pub fn code(self) -> u8 {
        self.row * 10 + self.col
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parse a (possibly space-padded) decimal cell code such as `" 04"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| CoordinateError::NotANumber(trimmed.to_string()))?;
        if value > MAX_CODE as u32 {
            return Err(CoordinateError::OutOfRange(value));
        }
        Coordinate::from_code(value as u8)
    }
}

impl fmt::Display for Coordinate {
    /// Always two digits, e.g. `04`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.code())
    }
}
