// src/rules.rs
//! Legality filtering and check / game-end detection.
//!
//! A move is legal when it is in the piece's pseudo-legal set and, once played, does not leave
//! the mover's king attacked. The second half is answered by actually playing the move on the
//! board, asking [`Board::is_king_in_check`], and putting everything back. [`Speculation`]
//! owns that window: the board is restored when it drops, whatever path the caller takes out.
use std::ops::Deref;

use crate::board::{Board, GameStatus};
use crate::movegen::pseudo_legal_destinations;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

/// A move applied to the board only for as long as this guard lives.
/// Never touches the turn, the log, the flags or the status.
struct Speculation<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: Piece,
    displaced: Option<Piece>,
}

impl<'a> Speculation<'a> {
    /// Returns `None` (and changes nothing) if `from` is empty.
    fn begin(board: &'a mut Board, from: Square, to: Square) -> Option<Self> {
        let moved = board.cell_mut(from).take()?;
        let displaced = board.cell_mut(to).take();
        let mut relocated = moved;
        relocated.move_to(to);
        *board.cell_mut(to) = Some(relocated);
        Some(Speculation { board, from, to, moved, displaced })
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;
    fn deref(&self) -> &Board { self.board }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        *self.board.cell_mut(self.to) = self.displaced.take();
        *self.board.cell_mut(self.from) = Some(self.moved);
    }
}

impl Board {
    /// Whether `from -> to` is a legal move for the side to move: a piece of that color stands
    /// on `from`, `to` is in its pseudo-legal set, and playing it leaves that color's king safe.
    /// The board is unchanged when this returns.
    pub fn validate_move(&mut self, from: Square, to: Square) -> bool {
        let piece = match self.piece_at(from) {
            Some(piece) if piece.color == self.current_turn => *piece,
            _ => return false,
        };
        if !pseudo_legal_destinations(&piece, &self.squares).contains(&to) {
            return false;
        }
        self.keeps_king_safe(from, to, piece.color)
    }

    /// Plays `from -> to` speculatively and reports whether `color`'s king is unattacked afterwards.
    fn keeps_king_safe(&mut self, from: Square, to: Square, color: Color) -> bool {
        match Speculation::begin(self, from, to) {
            Some(speculation) => !speculation.is_king_in_check(color),
            None => false,
        }
    }

    /// Square of `color`'s king, found by scanning the grid.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color).find(|p| p.kind == PieceType::King).map(|p| p.square)
    }

    /// True if some opposing piece could move onto `color`'s king square.
    /// A board without that king is simply "not in check".
    pub fn is_king_in_check(&self, color: Color) -> bool {
        let Some(king_sq) = self.find_king(color) else { return false };
        self.pieces(color.opponent())
            .any(|attacker| pseudo_legal_destinations(attacker, &self.squares).contains(&king_sq))
    }

    /// Legal destinations of the piece on `from`. Empty when the square is empty, holds a piece
    /// of the side not to move, the piece has no legal move, or the game is over.
    pub fn legal_destinations(&mut self, from: Square) -> Vec<Square> {
        if self.status.is_over() {
            return Vec::new();
        }
        let piece = match self.piece_at(from) {
            Some(piece) if piece.color == self.current_turn => *piece,
            _ => return Vec::new(),
        };
        pseudo_legal_destinations(&piece, &self.squares)
            .into_iter()
            .filter(|&to| self.keeps_king_safe(from, to, piece.color))
            .collect()
    }

    /// Every legal (from, to) pair for the side to move.
    pub fn legal_moves(&mut self) -> Vec<(Square, Square)> {
        let origins: Vec<Square> = self.pieces(self.current_turn).map(|p| p.square).collect();
        let mut moves = Vec::with_capacity(48);
        for from in origins {
            moves.extend(self.legal_destinations(from).into_iter().map(|to| (from, to)));
        }
        moves
    }

    /// Whether `color` has at least one legal move, stopping at the first one found.
    fn has_legal_move(&mut self, color: Color) -> bool {
        let own: Vec<Piece> = self.pieces(color).copied().collect();
        own.iter().any(|piece| {
            pseudo_legal_destinations(piece, &self.squares)
                .into_iter()
                .any(|to| self.keeps_king_safe(piece.square, to, color))
        })
    }

    pub(crate) fn refresh_check_flags(&mut self) {
        self.white_in_check = self.is_king_in_check(Color::White);
        self.black_in_check = self.is_king_in_check(Color::Black);
    }

    /// Runs after each executed move, once the turn has passed to the other side.
    /// Refreshes the check flags, then classifies checkmate / stalemate for the side to move.
    /// A finished game keeps its result.
    pub(crate) fn update_game_state(&mut self) {
        self.refresh_check_flags();
        if self.status.is_over() {
            return;
        }

        let to_move = self.current_turn;
        if self.has_legal_move(to_move) {
            return;
        }
        self.status = if self.is_in_check(to_move) {
            GameStatus::win_for(to_move.opponent()) // Checkmate
        } else {
            GameStatus::Draw // Stalemate
        };
    }
}
