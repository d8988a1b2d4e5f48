//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner

use crate::GameState;
use std::fmt;
use std::str::FromStr;

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

/// Represents the complete state of a Connect 4 game
///
/// Contains the board state and dimensions. The board uses 1 for player 1
/// pieces, -1 for player 2 pieces, and 0 for empty spaces. The player to
/// move is derived from the piece counts (player 1 moves when counts are
/// equal), so the snapshot carries no separate turn marker that could
/// drift out of sync with the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major, row 0 at the top)
    board: Vec<i32>,
    /// Board width (number of columns)
    width: usize,
    /// Board height (number of rows)
    height: usize,
    /// Number of pieces needed in a row to win
    line_size: usize,
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let cell = self.board[r * self.width + c];
                let symbol = match cell {
                    1 => "X",
                    -1 => "O",
                    _ => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move; // Column to drop a piece

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        (0..self.width)
            .filter(|&c| self.board[c] == 0)
            .map(Connect4Move)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        debug_assert!(
            self.is_legal(mv),
            "contract violation: column {} is full or out of range",
            mv.0
        );
        let player = self.get_current_player();
        for r in (0..self.height).rev() {
            let idx = r * self.width + mv.0;
            if self.board[idx] == 0 {
                self.board[idx] = player;
                return;
            }
        }
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || self.get_possible_moves().is_empty()
    }

    fn get_winner(&self) -> Option<i32> {
        self.line_winner()
    }

    fn get_current_player(&self) -> i32 {
        let mut balance = 0;
        for cell in &self.board {
            balance += cell;
        }
        // Equal counts means player 1 is to move.
        if balance == 0 {
            1
        } else {
            -1
        }
    }

    fn evaluate(&self) -> i32 {
        // Center-column control, +3 per own token, -3 per opponent token.
        // A coarse positional proxy, not a true evaluation.
        let center = self.width / 2;
        let mut score = 0;
        for r in 0..self.height {
            score += self.board[r * self.width + center] * 3;
        }
        score
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        Self {
            board: vec![0; width * height],
            width,
            height,
            line_size,
        }
    }

    /// Gets the board width (number of columns)
    pub fn get_width(&self) -> usize {
        self.width
    }

    /// Gets the board height (number of rows)
    pub fn get_height(&self) -> usize {
        self.height
    }

    /// Gets the number of pieces needed in a row to win
    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    /// Returns the cell value at (row, col): 1, -1, or 0 for empty.
    pub fn cell(&self, r: usize, c: usize) -> i32 {
        self.board[r * self.width + c]
    }

    /// Checks if a move is legal in the current game state
    ///
    /// A move is legal if the column is within bounds and the top row
    /// of that column is empty (pieces can be dropped).
    pub fn is_legal(&self, mv: &Connect4Move) -> bool {
        mv.0 < self.width && self.board[mv.0] == 0
    }

    /// Scans the whole board for a completed line and returns its owner.
    ///
    /// Orientation order is horizontal, vertical, down-right diagonal,
    /// down-left diagonal. The order decides which winning line is found
    /// first when several exist; only existence matters to the outcome.
    fn line_winner(&self) -> Option<i32> {
        let w = self.width as i32;
        let h = self.height as i32;
        let n = self.line_size as i32;
        let get = |x: i32, y: i32| -> i32 {
            if x < 0 || y < 0 || x >= w || y >= h {
                return 0;
            }
            self.board[(y * w + x) as usize]
        };
        // (start xs, start ys, step) per orientation
        let runs: [(std::ops::Range<i32>, std::ops::Range<i32>, (i32, i32)); 4] = [
            (0..w - n + 1, 0..h, (1, 0)),          // Horizontal
            (0..w, 0..h - n + 1, (0, 1)),          // Vertical
            (0..w - n + 1, 0..h - n + 1, (1, 1)),  // Diagonal (TL-BR)
            (n - 1..w, 0..h - n + 1, (-1, 1)),     // Diagonal (TR-BL)
        ];
        for (xs, ys, (dx, dy)) in runs {
            for y in ys.clone() {
                for x in xs.clone() {
                    let player = get(x, y);
                    if player == 0 {
                        continue;
                    }
                    if (1..n).all(|k| get(x + k * dx, y + k * dy) == player) {
                        return Some(player);
                    }
                }
            }
        }
        None
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    /// Creates a Connect4Move from a string representation
    ///
    /// Expected format is just the column number as a string.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use minimax::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 3);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Connect4State::new(7, 6, 4);
        assert_eq!(game.get_current_player(), 1);
        assert_eq!(game.get_width(), 7);
        assert_eq!(game.get_height(), 6);
        assert_eq!(game.get_line_size(), 4);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_legal_moves() {
        let game = Connect4State::new(7, 6, 4);
        let moves = game.get_possible_moves();
        assert_eq!(moves.len(), 7);
        for i in 0..7 {
            assert!(moves.contains(&Connect4Move(i)));
        }
    }

    #[test]
    fn test_make_move_and_derived_player() {
        let mut game = Connect4State::new(7, 6, 4);
        game.make_move(&Connect4Move(3));
        assert_eq!(game.cell(5, 3), 1);
        assert_eq!(game.get_current_player(), -1);

        game.make_move(&Connect4Move(3));
        assert_eq!(game.cell(4, 3), -1);
        assert_eq!(game.get_current_player(), 1);
    }

    #[test]
    fn test_full_column_is_not_playable() {
        let mut game = Connect4State::new(7, 6, 4);
        for _ in 0..6 {
            game.make_move(&Connect4Move(2));
        }
        assert!(!game.is_legal(&Connect4Move(2)));
        assert!(!game.get_possible_moves().contains(&Connect4Move(2)));
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_drop_into_full_column_is_rejected() {
        let mut game = Connect4State::new(7, 6, 4);
        for _ in 0..6 {
            game.make_move(&Connect4Move(2));
        }
        game.make_move(&Connect4Move(2));
    }

    #[test]
    fn test_win_condition_horizontal() {
        let mut game = Connect4State::new(7, 6, 4);
        // Player 1: 0, 1, 2, 3 -- Player 2: 0, 1, 2
        for col in [0, 0, 1, 1, 2, 2, 3] {
            game.make_move(&Connect4Move(col));
        }
        assert_eq!(game.get_winner(), Some(1));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_win_condition_vertical() {
        let mut game = Connect4State::new(7, 6, 4);
        for col in [0, 1, 0, 1, 0, 1, 0] {
            game.make_move(&Connect4Move(col));
        }
        assert_eq!(game.get_winner(), Some(1));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_win_condition_diagonal() {
        let mut game = Connect4State::new(7, 6, 4);
        for col in [0, 1, 1, 2, 2, 3, 2, 3, 3, 0, 3] {
            game.make_move(&Connect4Move(col));
        }
        assert_eq!(game.get_winner(), Some(1));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_second_player_can_win() {
        let mut game = Connect4State::new(7, 6, 4);
        for col in [0, 6, 1, 6, 2, 6, 0, 6] {
            game.make_move(&Connect4Move(col));
        }
        assert_eq!(game.get_winner(), Some(-1));
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        // 4x4 board filled in an alternating block pattern with no line.
        let mut game = Connect4State::new(4, 4, 4);
        for col in [1, 0, 1, 0, 3, 2, 3, 2, 0, 1, 0, 1, 2, 3, 2, 3] {
            game.make_move(&Connect4Move(col));
        }
        assert!(game.get_possible_moves().is_empty());
        assert_eq!(game.get_winner(), None);
        assert!(game.is_terminal());
    }

    #[test]
    fn test_center_column_heuristic() {
        let mut game = Connect4State::new(7, 6, 4);
        assert_eq!(game.evaluate(), 0);
        game.make_move(&Connect4Move(3)); // P1 center
        assert_eq!(game.evaluate(), 3);
        game.make_move(&Connect4Move(3)); // P2 center
        assert_eq!(game.evaluate(), 0);
        game.make_move(&Connect4Move(3)); // P1 center
        assert_eq!(game.evaluate(), 3);
        game.make_move(&Connect4Move(0)); // P2 edge
        assert_eq!(game.evaluate(), 3);
    }
}
