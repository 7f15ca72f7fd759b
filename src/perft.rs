// src/perft.rs
use crate::board::Board;

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
/// Each child is played on its own clone, so `board` is never modified.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut scratch = board.clone();
    let moves = scratch.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for (from, to) in moves {
        let mut child = board.clone();
        if child.execute_move(from, to) {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Per-root-move node counts, sorted by move. Useful for narrowing down a perft mismatch.
/// Depth 0 has no root moves, so the result is empty.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<((u8, u8, u8, u8), u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut scratch = board.clone();
    let mut results: Vec<_> = scratch.legal_moves()
        .into_iter()
        .map(|(from, to)| {
            let mut child = board.clone();
            let nodes = if child.execute_move(from, to) { perft(&child, depth - 1) } else { 0 };
            ((from.row(), from.col(), to.row(), to.col()), nodes)
        })
        .collect();
    results.sort();
    results
}
