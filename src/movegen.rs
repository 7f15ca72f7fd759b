// src/movegen.rs
//! Move shapes for each piece kind.
//!
//! Everything here is a pure function of a piece and the grid it stands on. Nothing reads
//! whose turn it is or whether a king is in check; the legality filter in `rules` sits on top.
use lazy_static::lazy_static;

use crate::board::Squares;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

// Directions for sliding pieces: (dr, dc, is_diagonal)
const DIRECTIONS: &[(i8, i8, bool)] = &[
    ( 1,  0, false), (-1,  0, false), ( 0,  1, false), ( 0, -1, false), // Orthogonal
    ( 1,  1, true),  ( 1, -1, true),  (-1,  1, true),  (-1, -1, true),  // Diagonal
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

lazy_static! {
    static ref KNIGHT_JUMPS: [Vec<Square>; 64] = compute_jumps(&KNIGHT_OFFSETS);
    static ref KING_STEPS: [Vec<Square>; 64] = compute_jumps(&KING_OFFSETS);
}

/// For every square, the on-board targets of a fixed offset pattern.
fn compute_jumps(offsets: &[(i8, i8)]) -> [Vec<Square>; 64] {
    let mut table: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for from in Square::all() {
        table[from.index()] = offsets.iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .collect();
    }
    table
}

#[inline]
fn occupant(squares: &Squares, sq: Square) -> Option<&Piece> {
    squares[sq.row() as usize][sq.col() as usize].as_ref()
}

/// Every square `piece` could move to by its movement rule alone ("pseudo-legal").
/// Does not consider whether the move would leave its own king attacked.
pub fn pseudo_legal_destinations(piece: &Piece, squares: &Squares) -> Vec<Square> {
    let mut moves = Vec::with_capacity(28);
    match piece.kind {
        PieceType::Pawn => pawn_moves(piece, squares, &mut moves),
        PieceType::Knight => jump_moves(piece, &KNIGHT_JUMPS[piece.square.index()], squares, &mut moves),
        PieceType::King => jump_moves(piece, &KING_STEPS[piece.square.index()], squares, &mut moves),
        PieceType::Bishop => sliding_moves(piece, true, false, squares, &mut moves),
        PieceType::Rook => sliding_moves(piece, false, true, squares, &mut moves),
        PieceType::Queen => sliding_moves(piece, true, true, squares, &mut moves),
    }
    moves
}

/// Single push, double push from an unmoved start-row pawn, diagonal captures onto enemies.
fn pawn_moves(piece: &Piece, squares: &Squares, moves: &mut Vec<Square>) {
    let forward = piece.color.forward();

    // 1. Single push, and the double push behind it
    if let Some(one) = piece.square.offset(forward, 0) {
        if occupant(squares, one).is_none() {
            moves.push(one);
            let on_start_row = piece.square.row() == piece.color.pawn_start_row();
            if on_start_row && !piece.has_moved {
                if let Some(two) = one.offset(forward, 0) {
                    if occupant(squares, two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // 2. Captures
    for dc in [-1, 1] {
        if let Some(target) = piece.square.offset(forward, dc) {
            if occupant(squares, target).is_some_and(|p| p.color != piece.color) {
                moves.push(target);
            }
        }
    }
}

/// Knights and kings: each precomputed target is fine unless a friendly piece sits there.
fn jump_moves(piece: &Piece, targets: &[Square], squares: &Squares, moves: &mut Vec<Square>) {
    moves.extend(targets.iter().copied().filter(|&to| !is_friendly(squares, to, piece.color)));
}

fn sliding_moves(piece: &Piece, diagonals: bool, orthogonals: bool, squares: &Squares, moves: &mut Vec<Square>) {
    for &(dr, dc, is_diagonal) in DIRECTIONS {
        if !((diagonals && is_diagonal) || (orthogonals && !is_diagonal)) { continue; }

        let mut current = piece.square;
        while let Some(next) = current.offset(dr, dc) {
            match occupant(squares, next) {
                None => moves.push(next),
                Some(blocker) => {
                    if blocker.color != piece.color { moves.push(next); } // Capture ends the ray
                    break;
                }
            }
            current = next;
        }
    }
}

#[inline]
fn is_friendly(squares: &Squares, sq: Square, color: Color) -> bool {
    occupant(squares, sq).is_some_and(|p| p.color == color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square { Square::new(row, col).unwrap() }

    fn empty() -> Squares { [[None; 8]; 8] }

    fn put(squares: &mut Squares, kind: PieceType, color: Color, row: i8, col: i8) -> Piece {
        let piece = Piece::new(kind, color, sq(row, col));
        squares[row as usize][col as usize] = Some(piece);
        piece
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> { v.sort(); v }

    #[test]
    fn rook_stops_at_capture_and_before_friend() {
        let mut squares = empty();
        let rook = put(&mut squares, PieceType::Rook, Color::White, 0, 0);
        put(&mut squares, PieceType::Knight, Color::Black, 0, 5);
        put(&mut squares, PieceType::Pawn, Color::White, 5, 0);

        let expected: Vec<Square> = [(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (1, 0), (2, 0), (3, 0), (4, 0)]
            .iter().map(|&(r, c)| sq(r, c)).collect();
        assert_eq!(sorted(pseudo_legal_destinations(&rook, &squares)), sorted(expected));
    }

    #[test]
    fn knight_ignores_blockers_but_not_friends() {
        let mut squares = empty();
        let knight = put(&mut squares, PieceType::Knight, Color::White, 3, 3);
        // Surround it; knights jump anyway
        for (dr, dc) in KING_OFFSETS {
            put(&mut squares, PieceType::Pawn, Color::White, 3 + dr, 3 + dc);
        }
        put(&mut squares, PieceType::Bishop, Color::White, 5, 4);
        put(&mut squares, PieceType::Bishop, Color::Black, 1, 2);

        let moves = pseudo_legal_destinations(&knight, &squares);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&sq(5, 4)));
        assert!(moves.contains(&sq(1, 2)));
    }

    #[test]
    fn knight_in_corner_has_two_jumps() {
        let mut squares = empty();
        let knight = put(&mut squares, PieceType::Knight, Color::Black, 7, 7);
        assert_eq!(sorted(pseudo_legal_destinations(&knight, &squares)), vec![sq(5, 6), sq(6, 5)]);
    }

    #[test]
    fn bishop_and_queen_rays() {
        let mut squares = empty();
        let bishop = put(&mut squares, PieceType::Bishop, Color::White, 0, 2);
        assert_eq!(pseudo_legal_destinations(&bishop, &squares).len(), 7);

        let queen = put(&mut squares, PieceType::Queen, Color::Black, 3, 3);
        // 14 orthogonal + 13 diagonal; the bishop is on none of the queen's lines
        assert_eq!(pseudo_legal_destinations(&queen, &squares).len(), 27);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let mut squares = empty();
        let pawn = put(&mut squares, PieceType::Pawn, Color::White, 1, 4);
        assert_eq!(sorted(pseudo_legal_destinations(&pawn, &squares)), vec![sq(2, 4), sq(3, 4)]);

        // Blocked two squares ahead: only the single push remains
        put(&mut squares, PieceType::Rook, Color::Black, 3, 4);
        assert_eq!(pseudo_legal_destinations(&pawn, &squares), vec![sq(2, 4)]);

        // Blocked directly ahead: no pushes at all, even though (3,4) is "reachable"
        put(&mut squares, PieceType::Rook, Color::Black, 2, 4);
        assert!(pseudo_legal_destinations(&pawn, &squares).is_empty());

        // Diagonals only onto enemies
        put(&mut squares, PieceType::Knight, Color::Black, 2, 3);
        put(&mut squares, PieceType::Knight, Color::White, 2, 5);
        assert_eq!(pseudo_legal_destinations(&pawn, &squares), vec![sq(2, 3)]);
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let mut squares = empty();
        let pawn = put(&mut squares, PieceType::Pawn, Color::Black, 6, 0);
        assert_eq!(sorted(pseudo_legal_destinations(&pawn, &squares)), vec![sq(4, 0), sq(5, 0)]);
    }

    #[test]
    fn moved_pawn_loses_double_step() {
        let mut squares = empty();
        let mut pawn = put(&mut squares, PieceType::Pawn, Color::White, 1, 0);
        pawn.has_moved = true;
        assert_eq!(pseudo_legal_destinations(&pawn, &squares), vec![sq(2, 0)]);
    }

    #[test]
    fn king_steps_avoid_friends() {
        let mut squares = empty();
        let king = put(&mut squares, PieceType::King, Color::White, 0, 4);
        put(&mut squares, PieceType::Pawn, Color::White, 1, 4);
        put(&mut squares, PieceType::Pawn, Color::Black, 1, 3);
        let moves = sorted(pseudo_legal_destinations(&king, &squares));
        assert_eq!(moves, vec![sq(0, 3), sq(0, 5), sq(1, 3), sq(1, 5)]);
    }
}
