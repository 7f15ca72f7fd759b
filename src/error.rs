// src/error.rs
use std::error::Error;
use std::fmt;
use std::io;

use crate::board::GameStatus;
use crate::square::Square;

/// Why a move request was turned down. A rejected move never changes the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    PieceNotFound(Square),
    NotPlayersTurn(Square),
    IllegalDestination(Square, Square), // Not reachable by the piece's movement rule
    LeavesKingInCheck(Square, Square),
    GameOver(GameStatus),
}
impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::PieceNotFound(sq) => write!(f, "No piece found at {}", sq),
            MoveError::NotPlayersTurn(sq) => write!(f, "The piece at {} does not belong to the side to move.", sq),
            MoveError::IllegalDestination(from, to) => write!(f, "Illegal move {} -> {}: the piece cannot move there.", from, to),
            MoveError::LeavesKingInCheck(from, to) => write!(f, "Illegal move {} -> {}: leaves king in check.", from, to),
            MoveError::GameOver(status) => write!(f, "The game is already over ({:?}).", status),
        }
    }
}
impl Error for MoveError {}

#[derive(Debug)]
pub enum SaveLoadError {
    Serialization(serde_json::Error),
    Io(String, io::Error),
    Inconsistent(String), // Snapshot decoded but describes an impossible grid
}
impl fmt::Display for SaveLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLoadError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SaveLoadError::Io(file, e) => write!(f, "I/O error with file '{}': {}", file, e),
            SaveLoadError::Inconsistent(reason) => write!(f, "Inconsistent board snapshot: {}", reason),
        }
    }
}
impl Error for SaveLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaveLoadError::Serialization(e) => Some(e),
            SaveLoadError::Io(_, e) => Some(e),
            SaveLoadError::Inconsistent(_) => None,
        }
    }
}

impl From<serde_json::Error> for SaveLoadError {
    fn from(e: serde_json::Error) -> Self { SaveLoadError::Serialization(e) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_squares() {
        let from = Square::new(1, 4).unwrap();
        let to = Square::new(4, 4).unwrap();
        assert_eq!(MoveError::PieceNotFound(from).to_string(), "No piece found at (1,4)");
        assert!(MoveError::IllegalDestination(from, to).to_string().contains("(1,4) -> (4,4)"));
        assert!(MoveError::GameOver(GameStatus::Draw).to_string().contains("Draw"));
    }

    #[test]
    fn json_errors_convert_and_keep_their_source() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: SaveLoadError = json_err.into();
        assert!(matches!(err, SaveLoadError::Serialization(_)));
        assert!(err.source().is_some());
    }
}
