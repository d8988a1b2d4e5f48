//! # Game Wrapper Module - Unified Game Interface
//!
//! This module provides the abstraction layer that allows the search
//! engine and UI code to work with any supported game type through a
//! single interface. Each game keeps its specific state and move types
//! while the wrapper exposes them generically.
//!
//! Using an enum rather than trait objects keeps dispatch static: no
//! heap allocation, no vtable, and exhaustive pattern matching whenever
//! game-specific handling is needed (player naming, move parsing).

use crate::games::checkers::{CheckersMove, CheckersState};
use crate::games::connect4::{Connect4Move, Connect4State};
use crate::games::memory::{MemoryMove, MemoryState};
use crate::GameState;
use std::fmt;

/// Wrapper enum for all supported game types
///
/// Each variant contains the complete game state for its game. All
/// contained states are plain value types (`Clone + Send`), so the
/// wrapper can be handed to the AI worker thread as a whole.
#[derive(Debug, Clone)]
pub enum GameWrapper {
    /// Connect 4 game state (gravity drops, four in a row wins)
    Connect4(Connect4State),
    /// Checkers game state (single-hop draughts variant)
    Checkers(CheckersState),
    /// Memory game state (hidden pair matching)
    Memory(MemoryState),
}

/// Wrapper enum for all supported move types
///
/// Moves implement `Eq` and `Hash` so they can key move tables and be
/// compared against the legal-move list during validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveWrapper {
    /// Connect4 move: column selection, gravity determines the row
    Connect4(Connect4Move),
    /// Checkers move: from/to squares plus the resolved capture
    Checkers(CheckersMove),
    /// Memory move: an unordered pair of hidden cells to reveal
    Memory(MemoryMove),
}

impl fmt::Display for MoveWrapper {
    /// Formats moves compactly for history listings and logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::Connect4(m) => write!(f, "C4({})", m.0),
            MoveWrapper::Checkers(m) => write!(f, "CK({})", m),
            MoveWrapper::Memory(m) => write!(f, "M({})", m),
        }
    }
}

impl fmt::Display for GameWrapper {
    /// Delegates to the specific game's board rendering
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::Connect4(g) => write!(f, "{}", g),
            GameWrapper::Checkers(g) => write!(f, "{}", g),
            GameWrapper::Memory(g) => write!(f, "{}", g),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameState for GameWrapper {
            type Move = MoveWrapper;

            fn get_current_player(&self) -> i32 {
                match self {
                    $(GameWrapper::$variant(g) => g.get_current_player(),)*
                }
            }

            fn get_possible_moves(&self) -> Vec<Self::Move> {
                match self {
                    $(GameWrapper::$variant(g) => g
                        .get_possible_moves()
                        .into_iter()
                        .map(MoveWrapper::$variant)
                        .collect(),)*
                }
            }

            fn make_move(&mut self, mv: &Self::Move) {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.make_move(m),)*
                    _ => panic!("Mismatched game and move types"),
                }
            }

            fn is_terminal(&self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_terminal(),)*
                }
            }

            fn get_winner(&self) -> Option<i32> {
                match self {
                    $(GameWrapper::$variant(g) => g.get_winner(),)*
                }
            }

            fn evaluate(&self) -> i32 {
                match self {
                    $(GameWrapper::$variant(g) => g.evaluate(),)*
                }
            }
        }

        impl GameWrapper {
            /// Checks if a move is legal in the current game state
            pub fn is_legal(&self, mv: &MoveWrapper) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.is_legal(m),)*
                    _ => false,
                }
            }
        }
    };
}

impl_game_dispatch!(Connect4, Checkers, Memory);

impl GameWrapper {
    /// Human-readable name of the wrapped game
    pub fn name(&self) -> &'static str {
        match self {
            GameWrapper::Connect4(_) => "Connect 4",
            GameWrapper::Checkers(_) => "Checkers",
            GameWrapper::Memory(_) => "Memory",
        }
    }

    /// Human-readable name of a player in the wrapped game
    pub fn player_name(&self, player: i32) -> &'static str {
        match self {
            GameWrapper::Connect4(_) => {
                if player == 1 {
                    "X"
                } else {
                    "O"
                }
            }
            GameWrapper::Checkers(_) => {
                if player == 1 {
                    "Red"
                } else {
                    "Blue"
                }
            }
            GameWrapper::Memory(_) => {
                if player == 1 {
                    "Player 1"
                } else {
                    "Player 2"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let move_wrapper = MoveWrapper::Connect4(Connect4Move(3));
        assert_eq!(format!("{}", move_wrapper), "C4(3)");

        let game_wrapper = GameWrapper::Connect4(Connect4State::new(7, 6, 4));
        let _ = format!("{}", game_wrapper);
    }

    #[test]
    fn test_dispatch_roundtrip() {
        let mut game = GameWrapper::Connect4(Connect4State::new(7, 6, 4));
        let moves = game.get_possible_moves();
        assert_eq!(moves.len(), 7);
        assert!(game.is_legal(&moves[0]));
        game.make_move(&moves[0]);
        assert_eq!(game.get_current_player(), -1);
    }

    #[test]
    fn test_mismatched_move_is_illegal() {
        let game = GameWrapper::Checkers(CheckersState::new());
        let mv = MoveWrapper::Connect4(Connect4Move(0));
        assert!(!game.is_legal(&mv));
    }

    #[test]
    fn test_player_names() {
        let c4 = GameWrapper::Connect4(Connect4State::new(7, 6, 4));
        assert_eq!(c4.player_name(1), "X");
        assert_eq!(c4.player_name(-1), "O");
        let ck = GameWrapper::Checkers(CheckersState::new());
        assert_eq!(ck.player_name(1), "Red");
    }
}
