//! # Multi-Game Minimax Arena
//!
//! Main entry point for a multi-game engine that supports Connect 4,
//! checkers, and a memory pair-matching game. The board games are driven
//! by a depth-limited minimax search with alpha-beta pruning; the memory
//! game is played by knowledge-tracking agents that search their own
//! beliefs rather than the hidden board.
//!
//! ## Usage
//! ```text
//! play --game connect4 --mode hva --depth 4
//! play --game memory --mode ava --seed 7
//! ```
//! Modes: `hvh` (two humans), `hva` (human first, engine second),
//! `ava` (engine against engine).

mod tui;

use clap::{Parser, ValueEnum};
use minimax::game_controller::{GameController, GameStatus, MoveResult};
use minimax::game_wrapper::{GameWrapper, MoveWrapper};
use minimax::games::checkers::CheckersState;
use minimax::games::connect4::Connect4State;
use minimax::games::memory::{MemoryAgent, MemoryMove, MemoryState};
use minimax::Minimax;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Which game to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameChoice {
    /// Connect 4 on a 7x6 board
    Connect4,
    /// Single-hop checkers on an 8x8 board
    Checkers,
    /// Memory pair matching on a 4x4 grid
    Memory,
}

/// Who controls each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Human vs human
    Hvh,
    /// Human (first player) vs engine
    Hva,
    /// Engine vs engine
    Ava,
}

/// Command-line arguments for the arena
#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-game minimax arena", long_about = None)]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameChoice::Connect4)]
    game: GameChoice,

    /// Player configuration
    #[arg(long, value_enum, default_value_t = Mode::Hva)]
    mode: Mode,

    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// RNG seed for reproducible memory games (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Mode {
    /// Whether the given side is controlled by a human
    fn is_human(self, player: i32) -> bool {
        match self {
            Mode::Hvh => true,
            Mode::Hva => player == 1,
            Mode::Ava => false,
        }
    }
}

/// Messages sent to the AI worker thread
#[derive(Debug)]
enum AIRequest {
    /// Start a search from the given position
    Search {
        request_id: u64,
        game_state: GameWrapper,
    },
    /// Shut the worker down
    Stop,
}

/// Messages received from the AI worker thread
#[derive(Debug)]
enum AIResponse {
    /// Search finished: best move and its minimax score
    MoveReady {
        request_id: u64,
        mv: MoveWrapper,
        score: i32,
    },
    /// The searched position had no legal moves
    NoMove { request_id: u64 },
}

/// The AI worker that runs in a separate thread
///
/// Keeps the blocking search off the thread that owns stdin, so a
/// long search never wedges the interface mid-prompt.
struct AIWorker {
    engine: Minimax,
}

impl AIWorker {
    fn new(depth: u32) -> Self {
        AIWorker {
            engine: Minimax::new(depth),
        }
    }

    /// Main worker loop: serves search requests until told to stop
    fn run(self, rx: Receiver<AIRequest>, tx: Sender<AIResponse>) {
        while let Ok(request) = rx.recv() {
            match request {
                AIRequest::Search {
                    request_id,
                    game_state,
                } => {
                    let response = match self.engine.search(&game_state) {
                        Some((mv, score)) => AIResponse::MoveReady {
                            request_id,
                            mv,
                            score,
                        },
                        None => AIResponse::NoMove { request_id },
                    };
                    if tx.send(response).is_err() {
                        break;
                    }
                }
                AIRequest::Stop => break,
            }
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    match args.game {
        GameChoice::Connect4 => run_board_game(
            &args,
            GameWrapper::Connect4(Connect4State::new(7, 6, 4)),
        ),
        GameChoice::Checkers => run_board_game(&args, GameWrapper::Checkers(CheckersState::new())),
        GameChoice::Memory => run_memory_game(&args, seed),
    }
}

/// Drives a perfect-information game to completion
///
/// Human moves go through the validated path; engine moves come back
/// from the worker and take the trusted path.
fn run_board_game(args: &Args, initial: GameWrapper) -> io::Result<()> {
    let mut controller = GameController::new(initial);

    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    let worker = AIWorker::new(args.depth);
    let handle = thread::spawn(move || worker.run(request_rx, response_tx));
    let mut request_id = 0u64;

    while !controller.is_game_over() {
        tui::render(controller.get_render_state());
        let player = controller.get_current_player();

        if args.mode.is_human(player) {
            let mv = tui::read_human_move(&controller)?;
            controller.try_make_move(mv);
        } else {
            request_id += 1;
            let request = AIRequest::Search {
                request_id,
                game_state: controller.get_state_for_search(),
            };
            if request_tx.send(request).is_err() {
                break;
            }
            match response_rx.recv() {
                Ok(AIResponse::MoveReady { mv, score, .. }) => {
                    tui::announce_engine_move(controller.get_render_state(), player, &mv, score);
                    controller.apply_trusted_move(mv);
                }
                Ok(AIResponse::NoMove { .. }) | Err(_) => break,
            }
        }
    }

    let _ = request_tx.send(AIRequest::Stop);
    let _ = handle.join();

    tui::render(controller.get_render_state());
    tui::announce(controller.get_render_state(), controller.get_status());
    println!("\n{}", controller.format_history());
    Ok(())
}

/// Drives the memory game to completion
///
/// The hidden board stays with the controller; computer players only
/// ever see the public reveals fed to them here. Both players' flips
/// are public, so every agent observes every move.
fn run_memory_game(args: &Args, seed: u64) -> io::Result<()> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let state = MemoryState::new(4, 4, &mut rng);
    let mut controller = GameController::new(GameWrapper::Memory(state));

    // One agent per engine-controlled side, seeded off the board seed so
    // a fixed --seed reproduces the whole game.
    let mut agents: Vec<(i32, MemoryAgent)> = [1, -1]
        .into_iter()
        .filter(|&p| !args.mode.is_human(p))
        .enumerate()
        .map(|(i, p)| (p, MemoryAgent::new(args.depth, seed.wrapping_add(i as u64 + 1))))
        .collect();

    while !controller.is_game_over() {
        tui::render(controller.get_render_state());
        let player = controller.get_current_player();

        let mv = if args.mode.is_human(player) {
            match tui::read_human_move(&controller)? {
                MoveWrapper::Memory(mv) => mv,
                _ => unreachable!("memory controller only validates memory moves"),
            }
        } else {
            let snapshot = match controller.get_render_state() {
                GameWrapper::Memory(s) => s.clone(),
                _ => unreachable!("memory mode runs a memory controller"),
            };
            let agent = &mut agents
                .iter_mut()
                .find(|(p, _)| *p == player)
                .expect("engine side has an agent")
                .1;
            match agent.choose(&snapshot) {
                Some(mv) => mv,
                None => break,
            }
        };

        // Letters must be captured before applying: a mismatch hides
        // the cells again.
        let (first, second, matched) = match controller.get_render_state() {
            GameWrapper::Memory(s) => (
                s.letter_at(mv.0),
                s.letter_at(mv.1),
                s.value_at(mv.0) == s.value_at(mv.1),
            ),
            _ => unreachable!(),
        };

        let result = if args.mode.is_human(player) {
            controller.try_make_move(MoveWrapper::Memory(mv.clone()))
        } else {
            println!(
                "{} flips {}",
                controller.get_render_state().player_name(player),
                MoveWrapper::Memory(mv.clone())
            );
            controller.apply_trusted_move(MoveWrapper::Memory(mv.clone()))
        };
        debug_assert!(matches!(result, MoveResult::Success { .. }));

        tui::show_reveal(&mv, first, second, matched);
        publish_reveal(&mut agents, &mv, first, second, matched);
    }

    tui::render(controller.get_render_state());
    tui::announce(controller.get_render_state(), controller.get_status());
    if controller.get_status() == GameStatus::Draw {
        println!("Both sides matched the same number of pairs.");
    }
    println!("\n{}", controller.format_history());
    Ok(())
}

/// Feeds one public flip into every agent's knowledge model
fn publish_reveal(
    agents: &mut [(i32, MemoryAgent)],
    mv: &MemoryMove,
    first: char,
    second: char,
    matched: bool,
) {
    for (_, agent) in agents.iter_mut() {
        if matched {
            agent.observe_match(mv.0, mv.1);
        } else {
            agent.observe_reveal(mv.0, first as u8 - b'A');
            agent.observe_reveal(mv.1, second as u8 - b'A');
        }
    }
}
