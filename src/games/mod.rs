//! # Game Implementations Module
//!
//! This module contains implementations of all supported games in the
//! minimax engine. Each game implements the `GameState` trait to provide a
//! consistent interface for the search algorithm and user interface.
//!
//! ## Supported Games
//! - **Connect 4**: Gravity-based connection game on a 6x7 grid for 2 players
//! - **Checkers**: Simplified draughts variant (single-hop captures) on an 8x8 board
//! - **Memory**: Pair-matching game on a hidden 4x4 grid, played under imperfect information
//!
//! ## Game Trait Implementation
//! All games implement the `minimax::GameState` trait which provides:
//! - Move generation and validation
//! - State transitions and game rules
//! - Terminal state detection and winner determination
//! - Heuristic evaluation and current player tracking
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. A move type (typically a struct with coordinates)
//! 2. A game state type with the GameState trait
//! 3. Display and parsing implementations for moves
//! 4. Game-specific rules and win conditions

pub mod checkers;
pub mod connect4;
pub mod memory;
