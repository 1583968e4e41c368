//! Sternhalma -- a Chinese Checkers engine speaking a line-oriented text
//! protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`.

use std::io::{self, BufRead};

use sternhalma::engine::Engine;
use sternhalma::protocol::parser::{parse_command, Command};
use tracing::warn;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                engine.set_option(&name, value.as_deref());
            }
            Command::NewGame { mode, seats } => {
                if let Err(e) = engine.new_game(mode, &seats) {
                    warn!("newgame: {}", e);
                }
            }
            Command::Position { snapshot } => {
                if let Err(e) = engine.set_position(&snapshot) {
                    warn!("position: {}", e);
                }
            }
            Command::Turn { triangle } => engine.set_turn(triangle),
            Command::Snapshot => engine.handle_snapshot(&mut out)?,
            Command::Moves { src } => engine.handle_moves(src, &mut out)?,
            Command::Move { src, dest } => engine.handle_move(src, dest, &mut out)?,
            Command::Done => engine.handle_done(&mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::NextTurn => engine.handle_nextturn(&mut out)?,
            Command::CheckWin { triangle } => engine.handle_checkwin(triangle, &mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
