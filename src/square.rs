// src/square.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: i8 = 8;

/// A (row, column) coordinate on the board. Row 0 is White's back rank, row 7 Black's.
/// Values are always in 0..8; anything else is rejected at construction, including when
/// a square is read back from a snapshot.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    row: u8,
    col: u8,
}

// Unchecked wire form; only reachable through `TryFrom`
#[derive(Deserialize)]
struct RawSquare {
    row: i64,
    col: i64,
}

impl TryFrom<RawSquare> for Square {
    type Error = String;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        i8::try_from(raw.row).ok()
            .zip(i8::try_from(raw.col).ok())
            .and_then(|(row, col)| Square::new(row, col))
            .ok_or_else(|| format!("square ({},{}) is not on the board", raw.row, raw.col))
    }
}

impl Square {
    /// Returns `None` for coordinates that are not on the board.
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 { self.row }
    pub fn col(&self) -> u8 { self.col }

    /// The square `(dr, dc)` away from this one, or `None` if that falls off the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        Square::new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Iterates all 64 squares, row by row starting at row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square { row: i / 8, col: i % 8 })
    }

    /// Flat index (0-63), used for the precomputed jump tables.
    pub(crate) fn index(&self) -> usize {
        (self.row * 8 + self.col) as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
