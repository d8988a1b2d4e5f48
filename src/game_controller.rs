//! # Game Controller Module - Central Game State Management
//!
//! This module provides the `GameController` which serves as the single
//! source of truth for the authoritative game state. It ensures proper
//! separation between:
//!
//! - **Authoritative Game State**: The "real" game state owned by the controller
//! - **AI Search States**: Clones explored by the minimax engine
//! - **UI Render States**: References used for display purposes
//!
//! ## Key Benefits
//! - **Move Validation**: Human input is validated before application,
//!   while engine-produced moves take a trusted fast path
//! - **Consistency**: Single source of truth prevents state divergence
//! - **Auditability**: Complete move history with timestamps

use crate::game_wrapper::{GameWrapper, MoveWrapper};
use crate::GameState;
use std::time::SystemTime;

/// Result of attempting to apply a move
#[derive(Debug, Clone)]
pub enum MoveResult {
    /// Move was successfully applied
    Success {
        /// The applied move
        move_made: MoveWrapper,
        /// Player who made the move
        player: i32,
        /// Whether the game is now over
        game_over: bool,
        /// Winner if game is over (None for draw)
        winner: Option<i32>,
    },
    /// Move was rejected as invalid
    Invalid {
        /// Reason the move was rejected
        reason: MoveValidationError,
    },
    /// Game is already over, no more moves allowed
    GameOver,
}

/// Errors that can occur during move validation
#[derive(Debug, Clone)]
pub enum MoveValidationError {
    /// Move is not in the list of legal moves
    IllegalMove,
    /// The game is already in a terminal state
    GameAlreadyOver,
}

impl std::fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveValidationError::IllegalMove => write!(f, "Illegal move"),
            MoveValidationError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    /// When the move was made
    pub timestamp: SystemTime,
    /// Player who made the move
    pub player: i32,
    /// The move that was made
    pub move_made: MoveWrapper,
    /// Move number (1-indexed)
    pub move_number: usize,
}

impl MoveHistoryEntry {
    /// Create a new move history entry
    pub fn new(player: i32, move_made: MoveWrapper, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player,
            move_made,
            move_number,
        }
    }
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(i32),
    /// Game ended in a draw
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// The central game controller that owns the authoritative game state
///
/// All moves go through the controller. Human moves are validated with
/// `try_make_move`; engine moves, which were generated from a clone of
/// this very state, skip validation via `apply_trusted_move`.
#[derive(Debug, Clone)]
pub struct GameController {
    /// The authoritative game state
    game_state: GameWrapper,
    /// Complete history of moves made
    move_history: Vec<MoveHistoryEntry>,
    /// Current game status
    status: GameStatus,
}

impl GameController {
    /// Create a new game controller with the given initial state
    pub fn new(initial_state: GameWrapper) -> Self {
        Self {
            game_state: initial_state,
            move_history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: &MoveWrapper) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if !self.game_state.is_legal(mv) {
            return Err(MoveValidationError::IllegalMove);
        }
        Ok(())
    }

    /// Attempt to make a move
    ///
    /// Validates the move and applies it if valid. Returns the result of
    /// the attempt.
    pub fn try_make_move(&mut self, mv: MoveWrapper) -> MoveResult {
        if let Err(reason) = self.validate_move(&mv) {
            return MoveResult::Invalid { reason };
        }
        self.apply(mv)
    }

    /// Force a move without validation (for AI moves that are trusted)
    ///
    /// Should only be used for moves that come from the search engine,
    /// which generates them from the same game rules.
    pub fn apply_trusted_move(&mut self, mv: MoveWrapper) -> MoveResult {
        if self.status.is_game_over() {
            return MoveResult::GameOver;
        }
        self.apply(mv)
    }

    fn apply(&mut self, mv: MoveWrapper) -> MoveResult {
        // Capture the mover before applying: in the memory game a match
        // keeps the turn, so the post-move player may be the same.
        let player = self.game_state.get_current_player();
        let move_number = self.move_history.len() + 1;

        self.game_state.make_move(&mv);
        self.move_history
            .push(MoveHistoryEntry::new(player, mv.clone(), move_number));

        let game_over = self.game_state.is_terminal();
        let winner = if game_over {
            self.game_state.get_winner()
        } else {
            None
        };

        if game_over {
            self.status = match winner {
                Some(w) => GameStatus::Win(w),
                None => GameStatus::Draw,
            };
        }

        MoveResult::Success {
            move_made: mv,
            player,
            game_over,
            winner,
        }
    }

    /// Get a clone of the game state for the engine to search
    ///
    /// The returned state can be freely modified by the search without
    /// affecting the authoritative state.
    pub fn get_state_for_search(&self) -> GameWrapper {
        self.game_state.clone()
    }

    /// Get a reference to the game state for rendering
    pub fn get_render_state(&self) -> &GameWrapper {
        &self.game_state
    }

    /// Get the current player
    pub fn get_current_player(&self) -> i32 {
        self.game_state.get_current_player()
    }

    /// Get the current game status
    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Get the winner if the game is over
    pub fn get_winner(&self) -> Option<i32> {
        match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        }
    }

    /// Get the complete move history
    pub fn get_move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get the number of moves made
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Get the last move made, if any
    pub fn get_last_move(&self) -> Option<&MoveHistoryEntry> {
        self.move_history.last()
    }

    /// Get legal moves for the current player
    pub fn get_legal_moves(&self) -> Vec<MoveWrapper> {
        if self.status.is_game_over() {
            Vec::new()
        } else {
            self.game_state.get_possible_moves()
        }
    }

    /// Reset the game to its initial state
    pub fn reset(&mut self, new_state: GameWrapper) {
        self.game_state = new_state;
        self.move_history.clear();
        self.status = GameStatus::InProgress;
    }

    /// Format the move history as a printable transcript
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = format!("=== {} Game History ===\n\n", self.game_state.name());

        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number,
                self.game_state.player_name(entry.player),
                entry.move_made
            ));
        }

        match self.status {
            GameStatus::Win(winner) => {
                output.push_str(&format!(
                    "\nResult: {} wins!\n",
                    self.game_state.player_name(winner)
                ));
            }
            GameStatus::Draw => {
                output.push_str("\nResult: Draw\n");
            }
            GameStatus::InProgress => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    self.game_state.player_name(self.get_current_player())
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::{Connect4Move, Connect4State};
    use crate::games::memory::{MemoryMove, MemoryState};

    fn connect4_controller() -> GameController {
        GameController::new(GameWrapper::Connect4(Connect4State::new(7, 6, 4)))
    }

    #[test]
    fn test_valid_move() {
        let mut controller = connect4_controller();
        let mv = MoveWrapper::Connect4(Connect4Move(3));
        match controller.try_make_move(mv) {
            MoveResult::Success {
                player, game_over, ..
            } => {
                assert_eq!(player, 1);
                assert!(!game_over);
            }
            _ => panic!("Expected successful move"),
        }
    }

    #[test]
    fn test_invalid_move_out_of_bounds() {
        let mut controller = connect4_controller();
        let mv = MoveWrapper::Connect4(Connect4Move(99));
        match controller.try_make_move(mv) {
            MoveResult::Invalid {
                reason: MoveValidationError::IllegalMove,
            } => {}
            _ => panic!("Expected illegal move error"),
        }
    }

    #[test]
    fn test_win_detection() {
        let mut controller = connect4_controller();
        // P1 stacks column 0, P2 stacks column 6; P1 connects first.
        for col in [0, 6, 0, 6, 0, 6] {
            controller.try_make_move(MoveWrapper::Connect4(Connect4Move(col)));
        }
        match controller.try_make_move(MoveWrapper::Connect4(Connect4Move(0))) {
            MoveResult::Success {
                game_over, winner, ..
            } => {
                assert!(game_over);
                assert_eq!(winner, Some(1));
            }
            _ => panic!("Expected winning move to succeed"),
        }
        assert_eq!(controller.get_status(), GameStatus::Win(1));
        assert!(matches!(
            controller.try_make_move(MoveWrapper::Connect4(Connect4Move(1))),
            MoveResult::Invalid {
                reason: MoveValidationError::GameAlreadyOver
            }
        ));
    }

    #[test]
    fn test_move_history_alternates_players() {
        let mut controller = connect4_controller();
        controller.try_make_move(MoveWrapper::Connect4(Connect4Move(3)));
        controller.try_make_move(MoveWrapper::Connect4(Connect4Move(4)));

        assert_eq!(controller.move_count(), 2);
        assert_eq!(controller.get_move_history()[0].player, 1);
        assert_eq!(controller.get_move_history()[1].player, -1);
    }

    #[test]
    fn test_match_keeps_turn_in_history() {
        let grid = vec![vec![0, 1], vec![0, 1]];
        let state = MemoryState::from_values(grid);
        let mut controller = GameController::new(GameWrapper::Memory(state));

        // (0,0)/(1,0) hold the same letter: mover keeps the turn.
        controller.try_make_move(MoveWrapper::Memory(MemoryMove::new((0, 0), (1, 0))));
        assert_eq!(controller.get_move_history()[0].player, 1);
        assert!(controller.is_game_over() || controller.get_current_player() == 1);
    }

    #[test]
    fn test_reset() {
        let mut controller = connect4_controller();
        controller.try_make_move(MoveWrapper::Connect4(Connect4Move(3)));
        assert_eq!(controller.move_count(), 1);

        controller.reset(GameWrapper::Connect4(Connect4State::new(7, 6, 4)));
        assert_eq!(controller.move_count(), 0);
        assert!(matches!(controller.get_status(), GameStatus::InProgress));
    }

    #[test]
    fn test_format_history() {
        let mut controller = connect4_controller();
        controller.try_make_move(MoveWrapper::Connect4(Connect4Move(3)));

        let history = controller.format_history();
        assert!(history.contains("Connect 4 Game History"));
        assert!(history.contains("1. X - C4(3)"));
    }
}
