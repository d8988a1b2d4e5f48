//! # Minimax Game Engine
//!
//! Core library for a multi-game adversarial search engine. The crate is
//! organized around a single [`GameState`] contract that every rule engine
//! implements, and a generic [`Minimax`] searcher (depth-bounded minimax
//! with alpha-beta pruning) that works against any implementation of that
//! contract.
//!
//! ## Conventions
//! - Two players, encoded as `1` and `-1`. Player `1` is always the
//!   maximizing side; player `-1` minimizes.
//! - Terminal outcomes propagate as `+WIN_SCORE` / `-WIN_SCORE` / `0`
//!   (win for player 1, win for player -1, draw). Heuristic values are
//!   produced only at the depth cutoff and are bounded well below
//!   [`WIN_SCORE`], so a decided game beats any heuristic alternative.
//! - States are value types: the engine clones before applying a move, so
//!   a caller-owned state is never mutated by a search.

pub mod game_controller;
pub mod game_wrapper;
pub mod games;

/// The state of the game. Must be cloneable so the search can expand
/// hypothetical positions without touching the caller's copy. `Send` is
/// required to hand states to an AI worker thread.
///
/// Implementations must guarantee that a non-terminal state has at least
/// one possible move; "no moves left" situations belong to the terminal
/// test (relevant for checkers, where a blocked side loses).
pub trait GameState: Clone + Send {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send;

    /// Returns a vector of all legal moves from the current state, in
    /// rule-engine order. The order is observable behavior: the searcher
    /// breaks ties in favor of the first move that reaches the best score.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it. Calling this with a move
    /// that is not in `get_possible_moves()` is a contract violation: the
    /// rule engines fail fast with a debug assertion rather than guessing
    /// at a correction. Untrusted moves must be validated first (see
    /// [`game_controller::GameController::try_make_move`]).
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// Should return `Some(player_id)` if a player has won, `None` for a
    /// draw or if the game is not over.
    fn get_winner(&self) -> Option<i32>;
    /// Returns the player whose turn it is to move. Derivable from the
    /// state snapshot alone; never backed by anything outside it.
    fn get_current_player(&self) -> i32;
    /// Heuristic score of a non-terminal state from player 1's
    /// perspective. Consulted only when the search depth is exhausted.
    fn evaluate(&self) -> i32;

    /// Pure move application: clones the state, applies the move, and
    /// returns the successor. The receiver is left untouched.
    fn apply(&self, mv: &Self::Move) -> Self {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }
}

/// Score propagated for a decided game: `+WIN_SCORE` for a player-1 win,
/// `-WIN_SCORE` for a player-(-1) win, `0` for a draw. Large enough that a
/// decided game always outranks any cutoff heuristic, so the engine never
/// trades a forced win for a good-looking position.
pub const WIN_SCORE: i32 = 1_000;

/// Maps a terminal state to the value propagated by the search.
fn terminal_value<S: GameState>(state: &S) -> i32 {
    match state.get_winner() {
        Some(w) => w.signum() * WIN_SCORE,
        None => 0,
    }
}

/// The minimax search engine.
///
/// Holds the fixed remaining-depth budget. There is no iterative
/// deepening, no transposition table, and no time-based cutoff: the only
/// bound on wall-clock cost is the depth and the branching factor. A
/// search call blocks until it returns.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    /// Number of plies to look ahead from the root.
    depth: u32,
}

impl Minimax {
    /// Creates an engine with the given search depth (plies).
    pub fn new(depth: u32) -> Self {
        Minimax { depth }
    }

    /// Returns the configured search depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Chooses a move for the current player of `state`.
    ///
    /// Returns the chosen move together with its score, or `None` if the
    /// state is terminal or has no moves. Whenever there is at least one
    /// legal move, a move is returned: the first legal move serves as the
    /// initial default, and only a strictly better score replaces the
    /// choice, so equally-scored alternatives lose to the first move that
    /// achieved the best score.
    pub fn search<S: GameState>(&self, state: &S) -> Option<(S::Move, i32)> {
        if state.is_terminal() {
            return None;
        }
        let moves = state.get_possible_moves();
        let maximizing = state.get_current_player() == 1;

        let mut best_move = moves.first()?.clone();
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;

        for mv in &moves {
            let next = state.apply(mv);
            let score = self.score(&next, self.depth.saturating_sub(1), alpha, beta);
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = mv.clone();
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = mv.clone();
                }
                beta = beta.min(best_score);
            }
            if alpha >= beta {
                break;
            }
        }
        Some((best_move, best_score))
    }

    /// Recursive scoring with an alpha-beta window.
    ///
    /// The terminal test runs before anything else, so a finished game is
    /// never expanded and the terminal mapping takes priority over the
    /// heuristic at depth 0. The max/min role of each level is derived
    /// from the state's current player rather than alternated blindly,
    /// because the memory game grants an extra turn after a match.
    fn score<S: GameState>(&self, state: &S, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        if state.is_terminal() {
            return terminal_value(state);
        }
        if depth == 0 {
            return state.evaluate();
        }

        let maximizing = state.get_current_player() == 1;
        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for mv in state.get_possible_moves() {
            let next = state.apply(&mv);
            let score = self.score(&next, depth - 1, alpha, beta);
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                // Remaining siblings cannot affect the decision.
                break;
            }
        }
        value
    }

    /// Exhaustive minimax without pruning. Same result as the pruned
    /// search, exponentially more nodes; kept for equivalence testing.
    #[doc(hidden)]
    pub fn score_unpruned<S: GameState>(&self, state: &S, depth: u32) -> i32 {
        if state.is_terminal() {
            return terminal_value(state);
        }
        if depth == 0 {
            return state.evaluate();
        }
        let maximizing = state.get_current_player() == 1;
        let scores = state
            .get_possible_moves()
            .into_iter()
            .map(|mv| self.score_unpruned(&state.apply(&mv), depth - 1));
        if maximizing {
            scores.max().unwrap_or_else(|| state.evaluate())
        } else {
            scores.min().unwrap_or_else(|| state.evaluate())
        }
    }

    /// Score of `state` as seen from the root of a fresh search window.
    /// Exposed so drivers and tests can compare positions without going
    /// through move selection.
    pub fn score_root<S: GameState>(&self, state: &S) -> i32 {
        self.score(state, self.depth, i32::MIN, i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::{Connect4Move, Connect4State};

    #[test]
    fn test_search_on_terminal_state_returns_none() {
        let mut game = Connect4State::new(7, 6, 4);
        for col in [0, 1, 0, 1, 0, 1, 0] {
            game.make_move(&Connect4Move(col));
        }
        assert!(game.is_terminal());
        let engine = Minimax::new(3);
        assert!(engine.search(&game).is_none());
    }

    #[test]
    fn test_search_always_returns_a_move() {
        // Depth 0 still yields a move: the first legal one is the default.
        let game = Connect4State::new(7, 6, 4);
        let engine = Minimax::new(0);
        let (mv, _) = engine.search(&game).unwrap();
        assert!(game.get_possible_moves().contains(&mv));
    }

    #[test]
    fn test_completes_four_in_a_row_in_center() {
        // Player 1 has three tokens in the center column and the minimizer
        // never blocked it. At any depth >= 1 the winning drop must be
        // preferred over every heuristic-only alternative.
        let mut game = Connect4State::new(7, 6, 4);
        for (own, other) in [(3, 0), (3, 1), (3, 2)] {
            game.make_move(&Connect4Move(own));
            game.make_move(&Connect4Move(other));
        }
        assert_eq!(game.get_current_player(), 1);
        for depth in 1..=4 {
            let engine = Minimax::new(depth);
            let (mv, score) = engine.search(&game).unwrap();
            assert_eq!(mv, Connect4Move(3), "depth {}", depth);
            assert_eq!(score, WIN_SCORE, "depth {}", depth);
        }
    }

    #[test]
    fn test_minimizer_blocks_immediate_threat() {
        // Player 1 threatens a vertical four in column 3 with -1 to move;
        // the only non-losing reply at depth 2 is to block the column.
        let mut game = Connect4State::new(7, 6, 4);
        for (own, other) in [(3, 0), (3, 1)] {
            game.make_move(&Connect4Move(own));
            game.make_move(&Connect4Move(other));
        }
        game.make_move(&Connect4Move(3));
        assert_eq!(game.get_current_player(), -1);
        let engine = Minimax::new(2);
        let (mv, _) = engine.search(&game).unwrap();
        assert_eq!(mv, Connect4Move(3));
    }

    #[test]
    fn test_pruned_and_unpruned_scores_agree() {
        let mut game = Connect4State::new(7, 6, 4);
        for col in [3, 2, 4, 4, 1, 5] {
            game.make_move(&Connect4Move(col));
        }
        for depth in 0..=4 {
            let engine = Minimax::new(depth);
            let pruned = engine.score(&game, depth, i32::MIN, i32::MAX);
            let plain = engine.score_unpruned(&game, depth);
            assert_eq!(pruned, plain, "depth {}", depth);
        }
    }

    #[test]
    fn test_apply_leaves_source_untouched() {
        let game = Connect4State::new(7, 6, 4);
        let before = format!("{}", game);
        let next = game.apply(&Connect4Move(3));
        assert_eq!(format!("{}", game), before);
        assert_ne!(format!("{}", next), before);
    }
}
