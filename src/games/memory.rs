//! # Memory Pair-Matching Game Implementation
//!
//! This module implements a two-player memory game on a grid of paired,
//! face-down values, together with the machinery that makes it playable
//! by the search engine: the true rule engine ([`MemoryState`]), the
//! agent-local [`Knowledge`] model, and the [`MemoryAgent`] that chooses
//! moves under imperfect information.
//!
//! ## Rules
//! - A turn reveals two chosen hidden cells
//! - Matching values stay revealed permanently, the revealing side scores
//!   a point and moves again
//! - Non-matching values are hidden again and the turn passes
//! - The game ends when every cell is revealed; the side with strictly
//!   more pairs wins, equal pairs is a draw
//!
//! ## Imperfect information
//! The true board is fixed and known to the engine but not to either
//! agent. All reveals are public, so an agent accumulates (cell, value)
//! facts from both sides' turns. Move selection searches the agent's
//! [`Knowledge`] - not the true board - through a [`BeliefState`] that
//! implements the same [`GameState`] contract the board games use.

use crate::{GameState, Minimax};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A board coordinate (row, col)
pub type Cell = (usize, usize);

/// Represents a move in the memory game: an unordered pair of distinct
/// hidden cells to reveal. Normalized so the smaller coordinate comes
/// first, making structurally equal pairs compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemoryMove(pub Cell, pub Cell);

impl MemoryMove {
    /// Creates a normalized pair move.
    pub fn new(a: Cell, b: Cell) -> Self {
        if a <= b {
            MemoryMove(a, b)
        } else {
            MemoryMove(b, a)
        }
    }
}

impl fmt::Display for MemoryMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}-{},{}",
            self.0 .0, self.0 .1, self.1 .0, self.1 .1
        )
    }
}

impl FromStr for MemoryMove {
    type Err = String;

    /// Creates a MemoryMove from a string representation
    ///
    /// Expected format is "r1,c1-r2,c2".
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use minimax::games::memory::MemoryMove;
    /// let mv = MemoryMove::from_str("2,3-0,1").unwrap();
    /// assert_eq!(mv, MemoryMove::new((0, 1), (2, 3)));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| "Expected format: r,c-r,c".to_string())?;
        let parse_cell = |part: &str| -> Result<Cell, String> {
            let (r, c) = part
                .split_once(',')
                .ok_or_else(|| "Expected format: r,c".to_string())?;
            Ok((
                r.trim().parse::<usize>().map_err(|e| e.to_string())?,
                c.trim().parse::<usize>().map_err(|e| e.to_string())?,
            ))
        };
        let first = parse_cell(a)?;
        let second = parse_cell(b)?;
        if first == second {
            return Err("A move must name two distinct cells".to_string());
        }
        Ok(MemoryMove::new(first, second))
    }
}

/// Represents the complete state of a memory game
///
/// The grid of true values is fixed at game start; `matched` marks the
/// cells that have been paired up and revealed permanently. Transient
/// flip-and-hide of a failed pair is presentation behavior and never
/// part of this state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryState {
    /// The hidden values, one pair per letter (0 = 'A', 1 = 'B', ...)
    values: Vec<Vec<u8>>,
    /// Cells that have been matched and stay revealed
    matched: Vec<Vec<bool>>,
    /// Pairs collected by player 1 and player -1
    scores: [i32; 2],
    /// Current player (1 or -1)
    current_player: i32,
}

impl fmt::Display for MemoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if self.matched[r][c] {
                    write!(f, "{} ", (b'A' + self.values[r][c]) as char)?;
                } else {
                    write!(f, "# ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for MemoryState {
    type Move = MemoryMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        let hidden = self.hidden_cells();
        let mut moves = Vec::new();
        for i in 0..hidden.len() {
            for j in i + 1..hidden.len() {
                moves.push(MemoryMove(hidden[i], hidden[j]));
            }
        }
        moves
    }

    fn make_move(&mut self, mv: &Self::Move) {
        debug_assert!(
            self.is_legal(mv),
            "contract violation: {} does not name two distinct hidden cells",
            mv
        );
        let (a, b) = (mv.0, mv.1);
        if self.values[a.0][a.1] == self.values[b.0][b.1] {
            self.matched[a.0][a.1] = true;
            self.matched[b.0][b.1] = true;
            let idx = if self.current_player == 1 { 0 } else { 1 };
            self.scores[idx] += 1;
            // A match grants another turn; the player does not change.
        } else {
            self.current_player = -self.current_player;
        }
    }

    fn is_terminal(&self) -> bool {
        self.matched.iter().flatten().all(|&m| m)
    }

    fn get_winner(&self) -> Option<i32> {
        if !self.is_terminal() {
            return None;
        }
        match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => Some(1),
            std::cmp::Ordering::Less => Some(-1),
            std::cmp::Ordering::Equal => None, // Draw
        }
    }

    fn get_current_player(&self) -> i32 {
        self.current_player
    }

    fn evaluate(&self) -> i32 {
        // Pair differential from player 1's perspective.
        self.scores[0] - self.scores[1]
    }
}

impl MemoryState {
    /// Creates a new memory game with a shuffled grid of value pairs
    ///
    /// `rows * cols` must be even and at most 52 (one letter pair each).
    /// Player 1 moves first. Shuffling uses the supplied generator, so a
    /// seeded run is fully reproducible.
    pub fn new<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        assert!(rows * cols % 2 == 0, "grid must hold complete pairs");
        assert!(rows * cols / 2 <= 26, "one letter per pair");
        let mut deck: Vec<u8> = (0..(rows * cols / 2) as u8)
            .flat_map(|v| [v, v])
            .collect();
        deck.shuffle(rng);
        let values = deck.chunks(cols).map(|chunk| chunk.to_vec()).collect();
        Self::from_values(values)
    }

    /// Creates a game from an explicit grid of values (tests, replays).
    pub fn from_values(values: Vec<Vec<u8>>) -> Self {
        let rows = values.len();
        let cols = values[0].len();
        MemoryState {
            values,
            matched: vec![vec![false; cols]; rows],
            scores: [0, 0],
            current_player: 1,
        }
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.values[0].len()
    }

    /// The true value of a cell. Public knowledge only once revealed;
    /// drivers use this to publish reveals to the agents.
    pub fn value_at(&self, cell: Cell) -> u8 {
        self.values[cell.0][cell.1]
    }

    /// The display letter of a cell's value
    pub fn letter_at(&self, cell: Cell) -> char {
        (b'A' + self.value_at(cell)) as char
    }

    /// Whether a cell has been matched and permanently revealed
    pub fn is_matched(&self, cell: Cell) -> bool {
        self.matched[cell.0][cell.1]
    }

    /// Pairs collected by the given player
    pub fn score_of(&self, player: i32) -> i32 {
        if player == 1 {
            self.scores[0]
        } else {
            self.scores[1]
        }
    }

    /// All still-hidden cells in row-major order
    pub fn hidden_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if !self.matched[r][c] {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Checks if a move is legal in the current game state
    ///
    /// A move is legal if it names two distinct cells that are both still
    /// hidden.
    pub fn is_legal(&self, mv: &MemoryMove) -> bool {
        let in_bounds = |cell: Cell| cell.0 < self.rows() && cell.1 < self.cols();
        mv.0 != mv.1
            && in_bounds(mv.0)
            && in_bounds(mv.1)
            && !self.is_matched(mv.0)
            && !self.is_matched(mv.1)
    }
}

/// An agent's partial record of the hidden board
///
/// Maps still-hidden cells to the values the agent has seen revealed.
/// This is not the true board state: it only ever contains facts that
/// were publicly visible, and facts are dropped once their cells are
/// matched away. Iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Knowledge {
    facts: BTreeMap<Cell, u8>,
}

impl Knowledge {
    /// Creates an empty knowledge model
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a publicly revealed value
    pub fn observe(&mut self, cell: Cell, value: u8) {
        self.facts.insert(cell, value);
    }

    /// Drops a cell that left play (matched and revealed permanently)
    pub fn forget(&mut self, cell: Cell) {
        self.facts.remove(&cell);
    }

    /// The value known for a cell, if any
    pub fn value_of(&self, cell: Cell) -> Option<u8> {
        self.facts.get(&cell).copied()
    }

    /// Number of recorded facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// True if nothing has been observed yet
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Two distinct hidden cells known to hold the same value, if any.
    /// Deterministic: the first such pair in cell order.
    pub fn known_pair(&self) -> Option<(Cell, Cell)> {
        let mut seen: BTreeMap<u8, Cell> = BTreeMap::new();
        for (&cell, &value) in &self.facts {
            if let Some(&first) = seen.get(&value) {
                return Some((first, cell));
            }
            seen.insert(value, cell);
        }
        None
    }
}

/// The searchable unit of a memory agent's decision
///
/// Holds only what the agent knows: the set of still-hidden cells and
/// the facts observed about some of them - never the true grid. A
/// hypothetical reveal of an unknown cell cannot predict its value, so
/// it is modeled as an information probe: the cell is consumed from the
/// hidden set, the mover is credited, and the turn passes.
///
/// The agent searches only when its knowledge holds no matching pair,
/// and no hypothetical reveal ever adds a fact, so no line inside the
/// search can produce a certain match. What the search optimizes is the
/// information balance: probe cheap unknowns, leave known mismatches
/// alone, and deny the opponent the last probes.
#[derive(Debug, Clone)]
struct BeliefState {
    knowledge: Knowledge,
    hidden: BTreeSet<Cell>,
    /// Information balance: probes by the agent minus probes against it
    probes: i32,
    agent_to_move: bool,
}

impl BeliefState {
    fn new(knowledge: &Knowledge, hidden: &[Cell]) -> Self {
        BeliefState {
            knowledge: knowledge.clone(),
            hidden: hidden.iter().copied().collect(),
            probes: 0,
            agent_to_move: true,
        }
    }
}

impl GameState for BeliefState {
    type Move = MemoryMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        let cells: Vec<Cell> = self.hidden.iter().copied().collect();
        let mut moves = Vec::new();
        for i in 0..cells.len() {
            for j in i + 1..cells.len() {
                moves.push(MemoryMove(cells[i], cells[j]));
            }
        }
        moves
    }

    fn make_move(&mut self, mv: &Self::Move) {
        let mover = if self.agent_to_move { 1 } else { -1 };
        // Two known cells always mismatch here (a known pair would have
        // been taken before searching): nothing is learned. An unknown
        // cell cannot have its value foreseen, so its reveal counts as an
        // information probe for the mover; pessimistically no match, and
        // the turn passes either way.
        for cell in [mv.0, mv.1] {
            if self.knowledge.value_of(cell).is_none() {
                self.hidden.remove(&cell);
                self.probes += mover;
            }
        }
        self.agent_to_move = !self.agent_to_move;
    }

    fn is_terminal(&self) -> bool {
        self.hidden.len() < 2
    }

    fn get_winner(&self) -> Option<i32> {
        if !self.is_terminal() {
            return None;
        }
        // The information race is decided by the probe balance.
        match self.probes.cmp(&0) {
            std::cmp::Ordering::Greater => Some(1),
            std::cmp::Ordering::Less => Some(-1),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn get_current_player(&self) -> i32 {
        if self.agent_to_move {
            1
        } else {
            -1
        }
    }

    fn evaluate(&self) -> i32 {
        self.probes
    }
}

/// A computer player for the memory game
///
/// Owns its knowledge model and random source. Selection policy:
/// 1. A pair already known to match is taken outright.
/// 2. Otherwise the shared search engine runs over the agent's
///    [`BeliefState`], depth-limited to bound the pair-enumeration
///    blow-up.
/// 3. If no reasoned choice emerges (depth 0, or nothing searchable), a
///    uniformly random hidden pair guarantees a legal move.
pub struct MemoryAgent {
    knowledge: Knowledge,
    engine: Minimax,
    rng: Xoshiro256PlusPlus,
}

impl MemoryAgent {
    /// Creates an agent with the given search depth and RNG seed
    pub fn new(search_depth: u32, seed: u64) -> Self {
        MemoryAgent {
            knowledge: Knowledge::new(),
            engine: Minimax::new(search_depth),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// The agent's current knowledge model
    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Feeds a public reveal into the knowledge model. Both players'
    /// reveals are public, so drivers call this for every flip.
    pub fn observe_reveal(&mut self, cell: Cell, value: u8) {
        self.knowledge.observe(cell, value);
    }

    /// Notes that two cells were matched and left play
    pub fn observe_match(&mut self, a: Cell, b: Cell) {
        self.knowledge.forget(a);
        self.knowledge.forget(b);
    }

    /// Chooses a pair of hidden cells to reveal.
    ///
    /// Returns `None` only when fewer than two cells remain hidden
    /// (the game is over).
    pub fn choose(&mut self, state: &MemoryState) -> Option<MemoryMove> {
        let hidden = state.hidden_cells();
        if hidden.len() < 2 {
            return None;
        }

        // 1. Guaranteed match straight from knowledge, no search.
        if let Some((a, b)) = self.knowledge.known_pair() {
            return Some(MemoryMove::new(a, b));
        }

        // 2. Depth-limited search over the belief, not the true board.
        if self.engine.depth() > 0 {
            let belief = BeliefState::new(&self.knowledge, &hidden);
            if let Some((mv, _)) = self.engine.search(&belief) {
                return Some(mv);
            }
        }

        // 3. Random fallback so the agent always produces a legal move.
        let picks: Vec<&Cell> = hidden.choose_multiple(&mut self.rng, 2).collect();
        Some(MemoryMove::new(*picks[0], *picks[1]))
    }
}
