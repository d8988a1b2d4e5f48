//! # Console Interface Module
//!
//! Line-oriented terminal front end for the arena. Renders boards with
//! colored glyphs, reads and validates human moves, and prints result
//! banners. All rendering reads the controller's state through the
//! public accessors; nothing here mutates game state.

use colored::Colorize;
use minimax::game_controller::{GameController, GameStatus};
use minimax::game_wrapper::{GameWrapper, MoveWrapper};
use minimax::games::checkers::CheckersState;
use minimax::games::connect4::{Connect4Move, Connect4State};
use minimax::games::memory::{Cell, MemoryMove, MemoryState};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Renders the current board to stdout
pub fn render(game: &GameWrapper) {
    println!();
    match game {
        GameWrapper::Connect4(g) => render_connect4(g),
        GameWrapper::Checkers(g) => render_checkers(g),
        GameWrapper::Memory(g) => render_memory(g),
    }
    println!();
}

fn render_connect4(game: &Connect4State) {
    print!("  ");
    for c in 0..game.get_width() {
        print!("{} ", c);
    }
    println!();
    for r in 0..game.get_height() {
        print!("  ");
        for c in 0..game.get_width() {
            match game.cell(r, c) {
                1 => print!("{} ", "X".red().bold()),
                -1 => print!("{} ", "O".yellow().bold()),
                _ => print!("{} ", ".".dimmed()),
            }
        }
        println!();
    }
}

fn render_checkers(game: &CheckersState) {
    print!("  ");
    for c in 0..8 {
        print!("{} ", c);
    }
    println!();
    for r in 0..8 {
        print!("{} ", r);
        for c in 0..8 {
            match game.cell(r, c) {
                1 => print!("{} ", "r".red()),
                2 => print!("{} ", "R".red().bold()),
                -1 => print!("{} ", "b".blue()),
                -2 => print!("{} ", "B".blue().bold()),
                _ => print!("{} ", ".".dimmed()),
            }
        }
        println!();
    }
}

fn render_memory(game: &MemoryState) {
    print!("  ");
    for c in 0..game.cols() {
        print!("{} ", c);
    }
    println!();
    for r in 0..game.rows() {
        print!("{} ", r);
        for c in 0..game.cols() {
            if game.is_matched((r, c)) {
                print!("{} ", game.letter_at((r, c)).to_string().green().bold());
            } else {
                print!("{} ", "#".dimmed());
            }
        }
        println!();
    }
    println!(
        "  Pairs: {} {} / {} {}",
        "Player 1".red(),
        game.score_of(1),
        "Player 2".blue(),
        game.score_of(-1)
    );
}

/// Prints the transient outcome of a memory flip
///
/// Mismatched cells go face-down again, so this is the only moment the
/// revealed letters are visible to the players.
pub fn show_reveal(mv: &MemoryMove, first: char, second: char, matched: bool) {
    let outcome = if matched {
        "match!".green().bold().to_string()
    } else {
        "no match".dimmed().to_string()
    };
    println!(
        "Revealed ({},{})={} and ({},{})={} - {}",
        mv.0 .0, mv.0 .1, first, mv.1 .0, mv.1 .1, second, outcome
    );
}

fn input_hint(game: &GameWrapper) -> &'static str {
    match game {
        GameWrapper::Connect4(_) => "column number, e.g. 3",
        GameWrapper::Checkers(_) => "from-to squares, e.g. 5,0-4,1",
        GameWrapper::Memory(_) => "two cells, e.g. 0,1-2,3",
    }
}

fn parse_move(game: &GameWrapper, input: &str) -> Result<MoveWrapper, String> {
    match game {
        GameWrapper::Connect4(_) => Connect4Move::from_str(input).map(MoveWrapper::Connect4),
        GameWrapper::Checkers(g) => {
            let (from, to) = parse_square_pair(input)?;
            g.resolve_move(from, to)
                .map(MoveWrapper::Checkers)
                .ok_or_else(|| "No legal move between those squares".to_string())
        }
        GameWrapper::Memory(_) => MemoryMove::from_str(input).map(MoveWrapper::Memory),
    }
}

fn parse_square_pair(s: &str) -> Result<(Cell, Cell), String> {
    let (from_s, to_s) = s
        .split_once('-')
        .ok_or_else(|| "Expected format: r,c-r,c".to_string())?;
    let parse_square = |part: &str| -> Result<Cell, String> {
        let (r, c) = part
            .split_once(',')
            .ok_or_else(|| "Expected format: r,c".to_string())?;
        Ok((
            r.trim().parse::<usize>().map_err(|e| e.to_string())?,
            c.trim().parse::<usize>().map_err(|e| e.to_string())?,
        ))
    };
    Ok((parse_square(from_s)?, parse_square(to_s)?))
}

/// Reads a validated move from stdin, re-prompting on bad input
///
/// Returns an error only when stdin closes before a valid move arrives.
pub fn read_human_move(controller: &GameController) -> io::Result<MoveWrapper> {
    let game = controller.get_render_state();
    let player = game.player_name(controller.get_current_player());
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("{} to move ({}): ", player.bold(), input_hint(game));
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a move was entered",
            ));
        }

        let mv = match parse_move(game, line.trim()) {
            Ok(mv) => mv,
            Err(msg) => {
                println!("{}", msg.red());
                continue;
            }
        };
        if let Err(reason) = controller.validate_move(&mv) {
            println!("{}", reason.to_string().red());
            continue;
        }
        return Ok(mv);
    }
}

/// Prints the final result banner
pub fn announce(game: &GameWrapper, status: GameStatus) {
    match status {
        GameStatus::Win(winner) => {
            println!("{}", format!("{} wins!", game.player_name(winner)).green().bold());
        }
        GameStatus::Draw => {
            println!("{}", "Draw!".yellow().bold());
        }
        GameStatus::InProgress => {}
    }
}

/// Prints an engine move as it is played
pub fn announce_engine_move(game: &GameWrapper, player: i32, mv: &MoveWrapper, score: i32) {
    println!(
        "{} plays {} (score {})",
        game.player_name(player).bold(),
        mv,
        score
    );
}
