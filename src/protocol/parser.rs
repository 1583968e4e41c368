//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use tracing::warn;

use super::notation::{parse_position, parse_snapshot};
use crate::board::{Position, Snapshot, Triangle};
use crate::game::MatchMode;

/// Who sits on a triangle in a `newgame` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub triangle: Triangle,
    pub bot: bool,
    pub name: Option<String>,
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; the engine identifies itself.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a match: `newgame <mode> <T>:<human|bot>[:<name>] ...`.
    NewGame { mode: MatchMode, seats: Vec<Seat> },

    /// Replace the board with a snapshot.
    Position { snapshot: Snapshot },

    /// Hand the turn to the player on a triangle.
    Turn { triangle: Triangle },

    /// Print the current board as snapshot notation.
    Snapshot,

    /// List legal routes for the piece on `src`.
    Moves { src: Position },

    /// Move the turn player's piece.
    Move { src: Position, dest: Position },

    /// The last move's animation finished.
    Done,

    /// Let the bot on turn play.
    Go,

    /// Pass the turn.
    NextTurn,

    /// Ask whether the player on a triangle has won.
    CheckWin { triangle: Triangle },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "snapshot" => Some(Command::Snapshot),
        "done" => Some(Command::Done),
        "go" => Some(Command::Go),
        "nextturn" => Some(Command::NextTurn),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "newgame" => parse_newgame(args),
        "position" => parse_position_cmd(args),
        "turn" => parse_triangle_arg("turn", args).map(|triangle| Command::Turn { triangle }),
        "checkwin" => parse_triangle_arg("checkwin", args).map(|triangle| Command::CheckWin { triangle }),
        "moves" => parse_moves(args),
        "move" => parse_move(args),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let rest = &args[1..];
    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], &rest[vi + 1..]),
        None => (rest, &[][..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `newgame <bot|multiplayer> <T>:<human|bot>[:<name>] ...`.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    let Some((&mode, seat_tokens)) = args.split_first() else {
        warn!("malformed newgame: expected a mode and at least one seat");
        return None;
    };
    let mode = match mode.parse::<MatchMode>() {
        Ok(m) => m,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    let seats = seat_tokens
        .iter()
        .map(|t| parse_seat(t))
        .collect::<Option<Vec<_>>>()?;
    Some(Command::NewGame { mode, seats })
}

fn parse_seat(token: &str) -> Option<Seat> {
    let mut parts = token.splitn(3, ':');
    let triangle = parts.next().and_then(|t| t.parse::<Triangle>().ok());
    let kind = parts.next();
    let name = parts.next().filter(|n| !n.is_empty()).map(str::to_string);
    let bot = match kind {
        Some("bot") => true,
        Some("human") => false,
        _ => {
            warn!(seat = token, "malformed seat: expected '<T>:<human|bot>[:<name>]'");
            return None;
        }
    };
    match triangle {
        Some(triangle) => Some(Seat { triangle, bot, name }),
        None => {
            warn!(seat = token, "malformed seat: unknown triangle");
            None
        }
    }
}

/// Parses `position <snapshot>`.
fn parse_position_cmd(args: &[&str]) -> Option<Command> {
    let Some(&text) = args.first() else {
        warn!("malformed position: expected 'position <snapshot>'");
        return None;
    };
    match parse_snapshot(text) {
        Ok(snapshot) => Some(Command::Position { snapshot }),
        Err(e) => {
            warn!("malformed position: {}", e);
            None
        }
    }
}

fn parse_triangle_arg(command: &str, args: &[&str]) -> Option<Triangle> {
    let parsed = args.first().map(|t| t.parse::<Triangle>());
    match parsed {
        Some(Ok(t)) => Some(t),
        Some(Err(e)) => {
            warn!("malformed {}: {}", command, e);
            None
        }
        None => {
            warn!("malformed {}: expected a triangle", command);
            None
        }
    }
}

fn parse_position_arg(command: &str, token: Option<&&str>) -> Option<Position> {
    let Some(token) = token else {
        warn!("malformed {}: missing position", command);
        return None;
    };
    match parse_position(token) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("malformed {}: {}", command, e);
            None
        }
    }
}

/// Parses `moves <x,y>`.
fn parse_moves(args: &[&str]) -> Option<Command> {
    let src = parse_position_arg("moves", args.first())?;
    Some(Command::Moves { src })
}

/// Parses `move <x,y> <x,y>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    let src = parse_position_arg("move", args.first())?;
    let dest = parse_position_arg("move", args.get(1))?;
    Some(Command::Move { src, dest })
}
