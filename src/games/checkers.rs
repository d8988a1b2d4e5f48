//! # Checkers Game Implementation
//!
//! This module implements a simplified checkers (draughts) variant on an
//! 8x8 board. Pieces sit on the dark squares only and move diagonally;
//! a capture is a single hop over an adjacent enemy piece into the empty
//! square beyond it.
//!
//! ## Rules
//! - Men move one diagonal step toward the opponent's side; kings move in
//!   both row directions
//! - A hop over an adjacent enemy piece captures it immediately
//! - Each turn resolves at most one hop: multi-jump chains are not part
//!   of this variant
//! - A man reaching the far row is promoted to king, exactly once
//! - A side with no pieces, or with pieces but no legal move, loses;
//!   if neither side can move the game is a draw

use crate::GameState;
use std::fmt;
use std::str::FromStr;

/// Board size (8x8, pieces on dark squares)
const SIZE: usize = 8;

/// Represents a move in checkers
///
/// A diagonal step or a single hop. `captures` lists the squares of the
/// pieces removed by the move; with single-hop rules it holds at most one
/// entry, and it is empty for a plain step.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CheckersMove {
    /// Square the piece moves from (row, col)
    pub from: (usize, usize),
    /// Square the piece moves to (row, col)
    pub to: (usize, usize),
    /// Squares of captured enemy pieces
    pub captures: Vec<(usize, usize)>,
}

/// Represents the complete state of a checkers game
///
/// The board uses 1/-1 for men, 2/-2 for kings, and 0 for empty squares.
/// Player 1 starts on the bottom three rows and advances toward row 0;
/// player -1 starts on the top three rows and advances toward row 7.
/// The player to move is part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersState {
    /// The game board as a 2D vector
    board: Vec<Vec<i32>>,
    /// Current player (1 or -1)
    current_player: i32,
}

impl fmt::Display for CheckersState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let symbol = match self.board[r][c] {
                    1 => "r",
                    2 => "R",
                    -1 => "b",
                    -2 => "B",
                    _ => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for CheckersState {
    type Move = CheckersMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        self.moves_for(self.current_player)
    }

    fn make_move(&mut self, mv: &Self::Move) {
        debug_assert!(
            self.is_legal(mv),
            "contract violation: {} is not a generated move",
            mv
        );
        let mut piece = self.board[mv.from.0][mv.from.1];
        self.board[mv.from.0][mv.from.1] = 0;
        for &(cr, cc) in &mv.captures {
            self.board[cr][cc] = 0;
        }
        // Promotion happens exactly once: only a man entering the far row
        // is upgraded, a king passing through again is left alone.
        if piece == 1 && mv.to.0 == 0 {
            piece = 2;
        } else if piece == -1 && mv.to.0 == SIZE - 1 {
            piece = -2;
        }
        self.board[mv.to.0][mv.to.1] = piece;
        self.current_player = -self.current_player;
    }

    fn is_terminal(&self) -> bool {
        self.count_pieces(1) == 0
            || self.count_pieces(-1) == 0
            || !self.can_move(1)
            || !self.can_move(-1)
    }

    fn get_winner(&self) -> Option<i32> {
        if self.count_pieces(1) == 0 {
            return Some(-1);
        }
        if self.count_pieces(-1) == 0 {
            return Some(1);
        }
        let p1_can = self.can_move(1);
        let p2_can = self.can_move(-1);
        match (p1_can, p2_can) {
            (false, false) => None, // Both blocked: draw
            (false, true) => Some(-1),
            (true, false) => Some(1),
            (true, true) => None, // Game still in progress
        }
    }

    fn get_current_player(&self) -> i32 {
        self.current_player
    }

    fn evaluate(&self) -> i32 {
        // Material count: man 1, king 2, signed by side. The cell encoding
        // already carries exactly that weight.
        let mut score = 0;
        for row in &self.board {
            for &cell in row {
                score += cell;
            }
        }
        score
    }
}

impl CheckersState {
    /// Creates a new checkers game with the standard starting position
    ///
    /// Pieces occupy the dark squares of the top three rows (player -1)
    /// and the bottom three rows (player 1). Player 1 moves first.
    pub fn new() -> Self {
        let mut board = vec![vec![0; SIZE]; SIZE];
        for (r, row) in board.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if (r + c) % 2 == 1 {
                    if r < 3 {
                        *cell = -1;
                    } else if r > 4 {
                        *cell = 1;
                    }
                }
            }
        }
        CheckersState {
            board,
            current_player: 1,
        }
    }

    /// Returns the cell value at (row, col)
    pub fn cell(&self, r: usize, c: usize) -> i32 {
        self.board[r][c]
    }

    /// Checks if a move is legal in the current game state
    pub fn is_legal(&self, mv: &CheckersMove) -> bool {
        self.get_possible_moves().contains(mv)
    }

    /// Finds the legal move from `from` to `to`, filling in any capture.
    ///
    /// Human input only specifies the two squares; the capture list is an
    /// outcome of the rules, so it is resolved against the generated moves.
    pub fn resolve_move(&self, from: (usize, usize), to: (usize, usize)) -> Option<CheckersMove> {
        self.get_possible_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
    }

    fn count_pieces(&self, player: i32) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&cell| cell.signum() == player)
            .count()
    }

    fn can_move(&self, player: i32) -> bool {
        !self.moves_for(player).is_empty()
    }

    /// Row directions a piece may move in. Forward first; kings also get
    /// the backward direction.
    fn directions(piece: i32) -> &'static [i32] {
        match piece {
            1 => &[-1],
            -1 => &[1],
            2 => &[-1, 1],
            -2 => &[1, -1],
            _ => &[],
        }
    }

    /// All legal moves for `player`, in row-major piece order.
    ///
    /// Per piece: each row direction, then column offsets -1 and +1.
    /// A step into an empty adjacent square, or a single hop over an
    /// adjacent enemy into the empty square two steps away.
    fn moves_for(&self, player: i32) -> Vec<CheckersMove> {
        let mut moves = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                let piece = self.board[r][c];
                if piece.signum() != player {
                    continue;
                }
                for &dr in Self::directions(piece) {
                    for dc in [-1i32, 1] {
                        let nr = r as i32 + dr;
                        let nc = c as i32 + dc;
                        if nr < 0 || nc < 0 || nr >= SIZE as i32 || nc >= SIZE as i32 {
                            continue;
                        }
                        let target = self.board[nr as usize][nc as usize];
                        if target == 0 {
                            moves.push(CheckersMove {
                                from: (r, c),
                                to: (nr as usize, nc as usize),
                                captures: Vec::new(),
                            });
                        } else if target.signum() == -player {
                            let jr = nr + dr;
                            let jc = nc + dc;
                            if jr >= 0
                                && jc >= 0
                                && jr < SIZE as i32
                                && jc < SIZE as i32
                                && self.board[jr as usize][jc as usize] == 0
                            {
                                moves.push(CheckersMove {
                                    from: (r, c),
                                    to: (jr as usize, jc as usize),
                                    captures: vec![(nr as usize, nc as usize)],
                                });
                            }
                        }
                    }
                }
            }
        }
        moves
    }
}

impl Default for CheckersState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}-{},{}",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

impl FromStr for CheckersMove {
    type Err = String;

    /// Creates a CheckersMove from a string representation
    ///
    /// Expected format is "fromRow,fromCol-toRow,toCol". The capture list
    /// is left empty; callers resolve it against the legal moves with
    /// [`CheckersState::resolve_move`].
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use minimax::games::checkers::CheckersMove;
    /// let mv = CheckersMove::from_str("5,0-4,1").unwrap();
    /// assert_eq!(mv.from, (5, 0));
    /// assert_eq!(mv.to, (4, 1));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from_s, to_s) = s
            .split_once('-')
            .ok_or_else(|| "Expected format: r,c-r,c".to_string())?;
        let parse_square = |part: &str| -> Result<(usize, usize), String> {
            let (r, c) = part
                .split_once(',')
                .ok_or_else(|| "Expected format: r,c".to_string())?;
            Ok((
                r.trim().parse::<usize>().map_err(|e| e.to_string())?,
                c.trim().parse::<usize>().map_err(|e| e.to_string())?,
            ))
        };
        Ok(CheckersMove {
            from: parse_square(from_s)?,
            to: parse_square(to_s)?,
            captures: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Empty board for hand-built positions
    fn empty_board() -> CheckersState {
        CheckersState {
            board: vec![vec![0; SIZE]; SIZE],
            current_player: 1,
        }
    }

    #[test]
    fn test_new_game_setup() {
        let game = CheckersState::new();
        assert_eq!(game.count_pieces(1), 12);
        assert_eq!(game.count_pieces(-1), 12);
        assert_eq!(game.get_current_player(), 1);
        assert_eq!(game.evaluate(), 0);
        assert!(!game.is_terminal());
        // Pieces only on dark squares
        for r in 0..SIZE {
            for c in 0..SIZE {
                if (r + c) % 2 == 0 {
                    assert_eq!(game.cell(r, c), 0);
                }
            }
        }
    }

    #[test]
    fn test_opening_moves() {
        let game = CheckersState::new();
        let moves = game.get_possible_moves();
        // Four front-row men with open squares ahead, 7 step moves total
        // (the two edge-adjacent men have one direction each off-board).
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| m.captures.is_empty()));
        assert!(moves.iter().all(|m| m.from.0 == 5 && m.to.0 == 4));
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_move_outside_the_rules_is_rejected() {
        // A two-row straight slide is never generated.
        let mut game = CheckersState::new();
        game.make_move(&CheckersMove {
            from: (5, 0),
            to: (3, 0),
            captures: Vec::new(),
        });
    }

    #[test]
    fn test_men_move_forward_only() {
        let mut game = empty_board();
        game.board[4][3] = 1;
        game.board[3][2] = -1;
        game.current_player = -1;
        let moves = game.moves_for(-1);
        // The blue man may step down or hop the red man; never back up.
        assert!(moves.iter().all(|m| m.to.0 > m.from.0));
    }

    #[test]
    fn test_single_hop_capture() {
        let mut game = empty_board();
        game.board[4][3] = 1;
        game.board[3][2] = -1;
        let capture = game
            .get_possible_moves()
            .into_iter()
            .find(|m| !m.captures.is_empty())
            .unwrap();
        assert_eq!(capture.from, (4, 3));
        assert_eq!(capture.to, (2, 1));
        assert_eq!(capture.captures, vec![(3, 2)]);

        game.make_move(&capture);
        assert_eq!(game.cell(3, 2), 0);
        assert_eq!(game.cell(2, 1), 1);
        assert_eq!(game.count_pieces(-1), 0);
        assert_eq!(game.get_winner(), Some(1));
    }

    #[test]
    fn test_no_multi_jump_chain() {
        // Two enemy men in a row: the hop stops after the first capture
        // even though a second one would be available.
        let mut game = empty_board();
        game.board[6][1] = 1;
        game.board[5][2] = -1;
        game.board[3][4] = -1;
        let capture = game
            .get_possible_moves()
            .into_iter()
            .find(|m| !m.captures.is_empty())
            .unwrap();
        assert_eq!(capture.to, (4, 3));
        assert_eq!(capture.captures.len(), 1);
        game.make_move(&capture);
        // The second enemy piece is untouched and it is the opponent's turn.
        assert_eq!(game.cell(3, 4), -1);
        assert_eq!(game.get_current_player(), -1);
    }

    #[test]
    fn test_king_promotion_is_idempotent() {
        let mut game = empty_board();
        game.board[1][2] = 1;
        game.board[7][0] = -1; // Keep the opponent on the board
        let mv = game.resolve_move((1, 2), (0, 1)).unwrap();
        game.make_move(&mv);
        assert_eq!(game.cell(0, 1), 2);

        // Move the king out of and back into the far row: still a king,
        // never double-promoted.
        game.current_player = 1;
        let out = game.resolve_move((0, 1), (1, 0)).unwrap();
        game.make_move(&out);
        game.current_player = 1;
        let back = game.resolve_move((1, 0), (0, 1)).unwrap();
        game.make_move(&back);
        assert_eq!(game.cell(0, 1), 2);
    }

    #[test]
    fn test_king_moves_both_directions() {
        let mut game = empty_board();
        game.board[4][3] = 2;
        let moves = game.get_possible_moves();
        assert!(moves.iter().any(|m| m.to.0 == 3));
        assert!(moves.iter().any(|m| m.to.0 == 5));
    }

    #[test]
    fn test_blocked_side_loses() {
        // Player 1's lone man is wedged in the corner behind enemy pieces
        // it cannot hop; player -1 still has moves.
        let mut game = empty_board();
        game.board[7][0] = 1;
        game.board[6][1] = -1;
        game.board[5][2] = -1;
        assert!(game.moves_for(1).is_empty());
        assert!(game.can_move(-1));
        assert!(game.is_terminal());
        assert_eq!(game.get_winner(), Some(-1));
    }

    #[test]
    fn test_mutual_block_is_a_draw() {
        // Interlocked wedge along the bottom rows: every step square is
        // occupied and every hop lands off-board or on a piece.
        let mut game = empty_board();
        for (r, c) in [(7, 0), (6, 1), (7, 2), (7, 4), (7, 6)] {
            game.board[r][c] = 1;
        }
        for (r, c) in [
            (5, 0),
            (5, 2),
            (5, 4),
            (5, 6),
            (6, 3),
            (6, 5),
            (6, 7),
            (4, 3),
        ] {
            game.board[r][c] = -1;
        }
        assert!(game.moves_for(1).is_empty());
        assert!(game.moves_for(-1).is_empty());
        assert!(game.is_terminal());
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_material_evaluation() {
        let mut game = empty_board();
        game.board[4][3] = 1;
        game.board[2][1] = 2;
        game.board[5][2] = -1;
        assert_eq!(game.evaluate(), 2);
    }

    #[test]
    fn test_apply_does_not_mutate_source() {
        let game = CheckersState::new();
        let mv = game.get_possible_moves()[0].clone();
        let next = game.apply(&mv);
        assert_eq!(game, CheckersState::new());
        assert_ne!(game, next);
    }
}
