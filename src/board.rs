// src/board.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

use crate::error::{MoveError, SaveLoadError};
use crate::movegen::pseudo_legal_destinations;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// Standard starting position, drawn from Black's back rank (row 7) down to White's (row 0).
const START_LAYOUT: [&str; 8] = [
    "rnbqkbnr",
    "pppppppp",
    "........",
    "........",
    "........",
    "........",
    "PPPPPPPP",
    "RNBQKBNR",
];

/// The grid, indexed `[row][col]`.
pub type Squares = [[Option<Piece>; 8]; 8];

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus { Active, WhiteWins, BlackWins, Draw }

impl GameStatus {
    pub fn win_for(color: Color) -> Self {
        match color { Color::White => GameStatus::WhiteWins, Color::Black => GameStatus::BlackWins }
    }

    pub fn is_over(&self) -> bool { *self != GameStatus::Active }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::WhiteWins => Some(Color::White),
            GameStatus::BlackWins => Some(Color::Black),
            GameStatus::Active | GameStatus::Draw => None,
        }
    }
}

/// What sort of move a record describes. Castling, en passant and promotion are not played
/// by this engine; they would join here as new variants.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MoveKind { Quiet, Capture }

/// One executed move. Only the executor creates these, and the log never changes them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    from: Square,
    to: Square,
    piece: Piece,             // As placed on `to`
    captured: Option<Piece>,  // As it stood on `to` before the move
    kind: MoveKind,
}

impl MoveRecord {
    pub fn from(&self) -> Square { self.from }
    pub fn to(&self) -> Square { self.to }
    pub fn piece(&self) -> &Piece { &self.piece }
    pub fn captured(&self) -> Option<&Piece> { self.captured.as_ref() }
    pub fn kind(&self) -> MoveKind { self.kind }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)?;
        if let Some(captured) = &self.captured {
            write!(f, " x{}", captured)?;
        }
        Ok(())
    }
}

/// Summary of an accepted move, enough for a caller to build its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    /// Whether the side now to move is in check.
    pub check: bool,
    pub status: GameStatus,
}

impl MoveOutcome {
    pub fn is_checkmate(&self) -> bool { self.check && self.status.winner().is_some() }
    pub fn is_stalemate(&self) -> bool { !self.check && self.status == GameStatus::Draw }
}

/// Full game state: grid, side to move, move log, check flags and result.
/// Turn, log and status change only through [`Board::execute_move`] / [`Board::try_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) squares: Squares,
    pub(crate) current_turn: Color,
    pub(crate) move_history: Vec<MoveRecord>,
    pub(crate) white_in_check: bool,
    pub(crate) black_in_check: bool,
    pub(crate) status: GameStatus,
}

impl Default for Board {
    fn default() -> Self { Board::new() }
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Board::from_layout(START_LAYOUT).unwrap_or_else(Board::empty)
    }

    /// No pieces, White to move. Populate with [`Board::set_piece`].
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            current_turn: Color::White,
            move_history: Vec::new(),
            white_in_check: false,
            black_in_check: false,
            status: GameStatus::Active,
        }
    }

    /// Builds a position from eight 8-character rows, top row first (row 7 down to row 0).
    /// Letters as in [`Piece`]'s `Display`, `.` for an empty square. White moves first; the
    /// check flags and status are computed for the position, so a diagram where White is
    /// already mated or stalemated comes back finished. Returns `None` on a malformed diagram.
    pub fn from_layout(rows: [&str; 8]) -> Option<Self> {
        let mut board = Board::empty();
        for (i, line) in rows.iter().enumerate() {
            if line.chars().count() != 8 { return None; }
            let row = 7 - i as i8;
            for (col, c) in line.chars().enumerate() {
                if c == '.' { continue; }
                let square = Square::new(row, col as i8)?;
                board.set_piece(square, Some(Piece::from_char(c, square)?));
            }
        }
        board.update_game_state();
        Some(board)
    }

    pub fn squares(&self) -> &Squares { &self.squares }
    pub fn current_turn(&self) -> Color { self.current_turn }
    pub fn move_history(&self) -> &[MoveRecord] { &self.move_history }
    pub fn status(&self) -> GameStatus { self.status }

    /// Check flag for `color` as of the last executed move.
    pub fn is_in_check(&self, color: Color) -> bool {
        match color { Color::White => self.white_in_check, Color::Black => self.black_in_check }
    }

    /// The side to move is checkmated. The game is then over, won by the other side.
    pub fn is_checkmate(&self) -> bool {
        self.status.winner().is_some() && self.is_in_check(self.current_turn)
    }

    /// The side to move is not in check but has no legal move.
    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Draw && !self.is_in_check(self.current_turn)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.row() as usize][square.col() as usize].as_ref()
    }

    /// Like [`Board::piece_at`] but for raw coordinates; off-board reads as empty.
    pub fn piece_at_coords(&self, row: i8, col: i8) -> Option<&Piece> {
        Square::new(row, col).and_then(|sq| self.piece_at(sq))
    }

    /// Puts `piece` on `square` (or clears it) and returns the previous occupant.
    /// The placed piece's square is updated to match; its has-moved flag is left as given.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let placed = piece.map(|mut p| { p.square = square; p });
        std::mem::replace(self.cell_mut(square), placed)
    }

    pub(crate) fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.squares[square.row() as usize][square.col() as usize]
    }

    /// Iterates every piece of `color`, row by row.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().flatten().filter(move |p| p.color == color)
    }

    // --- Move Execution ---

    /// Executes `from -> to` for the side to move. Returns false, leaving the board untouched,
    /// if the move is not legal or the game is already over.
    pub fn execute_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Same as [`Board::execute_move`], but reports why a move was rejected and summarises
    /// an accepted one.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver(self.status));
        }
        let piece = *self.piece_at(from).ok_or(MoveError::PieceNotFound(from))?;
        if piece.color != self.current_turn {
            return Err(MoveError::NotPlayersTurn(from));
        }
        if !pseudo_legal_destinations(&piece, &self.squares).contains(&to) {
            return Err(MoveError::IllegalDestination(from, to));
        }
        if !self.validate_move(from, to) {
            return Err(MoveError::LeavesKingInCheck(from, to));
        }

        // 1. Lift the piece and whatever it lands on
        let mut moving = self.cell_mut(from).take().ok_or(MoveError::PieceNotFound(from))?;
        let captured = self.cell_mut(to).take();

        // 2. Place it
        moving.move_to(to);
        *self.cell_mut(to) = Some(moving);

        // 3. Record, hand the turn over, reclassify
        let kind = if captured.is_some() { MoveKind::Capture } else { MoveKind::Quiet };
        let record = MoveRecord { from, to, piece: moving, captured, kind };
        self.move_history.push(record.clone());
        self.current_turn = self.current_turn.opponent();
        self.update_game_state();

        Ok(MoveOutcome {
            record,
            check: self.is_in_check(self.current_turn),
            status: self.status,
        })
    }

    // --- Snapshots ---

    pub fn to_json(&self) -> Result<String, SaveLoadError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot made by [`Board::to_json`], rejecting grids whose pieces disagree
    /// with the cell they are stored in.
    pub fn from_json(json: &str) -> Result<Self, SaveLoadError> {
        let board: Board = serde_json::from_str(json)?;
        board.check_consistency()?;
        Ok(board)
    }

    pub fn save_to_file(&self, filename: &str) -> Result<(), SaveLoadError> {
        let json_data = serde_json::to_string_pretty(self)?;
        fs::write(filename, json_data)
            .map_err(|e| SaveLoadError::Io(filename.to_string(), e))
    }

    pub fn load_from_file(filename: &str) -> Result<Self, SaveLoadError> {
        let json_data = fs::read_to_string(filename)
            .map_err(|e| SaveLoadError::Io(filename.to_string(), e))?;
        Board::from_json(&json_data)
    }

    fn check_consistency(&self) -> Result<(), SaveLoadError> {
        for square in Square::all() {
            if let Some(piece) = self.piece_at(square) {
                if piece.square != square {
                    return Err(SaveLoadError::Inconsistent(format!(
                        "piece {} stored at {} claims to stand on {}", piece, square, piece.square
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in (0..8).rev() {
            write!(f, "{} | ", row)?;
            for col in 0..8 {
                match self.piece_at_coords(row, col) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    0 1 2 3 4 5 6 7")?;

        writeln!(f, "Turn: {:?}", self.current_turn)?;
        writeln!(f, "Status: {:?}", self.status)?;
        if self.white_in_check { writeln!(f, "White is in check")?; }
        if self.black_in_check { writeln!(f, "Black is in check")?; }
        Ok(())
    }
}
