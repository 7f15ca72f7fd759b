// src/lib.rs
//! Chess rules core: board state, per-piece move generation, self-check filtering, move
//! execution and checkmate / stalemate detection. Moves come in as (row, column) square pairs;
//! turning them into responses, storage or notation is left to the caller.

pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod piece;
pub mod rules;
pub mod square;

pub use board::{Board, GameStatus, MoveKind, MoveOutcome, MoveRecord, Squares};
pub use error::{MoveError, SaveLoadError};
pub use movegen::pseudo_legal_destinations;
pub use perft::{perft, perft_divide};
pub use piece::{Color, Piece, PieceType};
pub use square::Square;
