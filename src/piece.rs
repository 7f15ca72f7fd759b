// src/piece.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::square::Square;

// Rows the pawns start on and the far rank they are heading for
const WHITE_PAWN_START_ROW: u8 = 1;
const BLACK_PAWN_START_ROW: u8 = 6;
const WHITE_PROMOTION_ROW: u8 = 7;
const BLACK_PROMOTION_ROW: u8 = 0;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }

    /// Row delta of a pawn step for this color.
    pub fn forward(&self) -> i8 {
        match self { Color::White => 1, Color::Black => -1 }
    }

    pub fn pawn_start_row(&self) -> u8 {
        match self { Color::White => WHITE_PAWN_START_ROW, Color::Black => BLACK_PAWN_START_ROW }
    }

    pub fn promotion_row(&self) -> u8 {
        match self { Color::White => WHITE_PROMOTION_ROW, Color::Black => BLACK_PROMOTION_ROW }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType { Pawn, Rook, Knight, Bishop, Queen, King }

impl PieceType {
    /// Standard piece letter; pawns have none.
    pub fn notation(&self) -> &'static str {
        match self {
            PieceType::King => "K", PieceType::Queen => "Q", PieceType::Rook => "R",
            PieceType::Bishop => "B", PieceType::Knight => "N", PieceType::Pawn => "",
        }
    }
}

/// A piece as it stands on the board: fixed identity plus where it is and whether it has moved.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color, square: Square) -> Self {
        Piece { kind, color, square, has_moved: false }
    }

    pub(crate) fn from_char(c: char, square: Square) -> Option<Self> {
        let color = if c.is_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn, 'n' => PieceType::Knight, 'b' => PieceType::Bishop,
            'r' => PieceType::Rook, 'q' => PieceType::Queen, 'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(kind, color, square))
    }

    /// Records a relocation. The board calls this whenever it places the piece on a new cell.
    pub(crate) fn move_to(&mut self, square: Square) {
        self.square = square;
        self.has_moved = true;
    }

    /// True for a pawn standing on the far rank. Promotion itself is left to the caller.
    pub fn can_be_promoted(&self) -> bool {
        self.kind == PieceType::Pawn && self.square.row() == self.color.promotion_row()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceType::Pawn => 'p', PieceType::Knight => 'n', PieceType::Bishop => 'b',
            PieceType::Rook => 'r', PieceType::Queen => 'q', PieceType::King => 'k',
        };
        let symbol = match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}
