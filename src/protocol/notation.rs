//! Compact text notation for positions, paths and board snapshots.
//!
//! Position: `x,y` (for example `-3,13`).
//! Path: positions joined by `>` (for example `-2,12>0,14`).
//! Snapshot: `-` for an empty board, otherwise `;`-separated placements of
//! the form `<T><x>,<y>` (for example `A0,0;D-1,15`).

use crate::board::{Grid, Placement, Position, Snapshot, Triangle};
use crate::movegen::Route;

/// Errors that can occur while parsing notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid position '{0}', expected 'x,y'")]
    InvalidPosition(String),

    #[error("invalid triangle character '{0}'")]
    InvalidTriangle(char),

    #[error("empty placement entry")]
    EmptyEntry,
}

/// Parses `x,y`.
pub fn parse_position(s: &str) -> Result<Position, SnapshotError> {
    let invalid = || SnapshotError::InvalidPosition(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Position::new(x, y))
}

/// Formats a route's path as `x,y>x,y>...`.
pub fn format_path(grid: &Grid, route: &Route) -> String {
    route
        .path
        .iter()
        .map(|&c| grid.position(c).to_string())
        .collect::<Vec<_>>()
        .join(">")
}

/// Encodes a snapshot, `-` when it has no placements.
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    if snapshot.0.is_empty() {
        return "-".to_string();
    }
    snapshot
        .0
        .iter()
        .map(|p| format!("{}{},{}", p.peg.letter(), p.x, p.y))
        .collect::<Vec<_>>()
        .join(";")
}

/// Parses snapshot notation.
///
/// Only the syntax is checked here; whether every position exists and
/// appears once is checked when the snapshot is loaded onto a board.
pub fn parse_snapshot(s: &str) -> Result<Snapshot, SnapshotError> {
    let s = s.trim();
    if s == "-" || s.is_empty() {
        return Ok(Snapshot::default());
    }
    let mut placements = Vec::new();
    for entry in s.split(';') {
        let mut chars = entry.chars();
        let c = chars.next().ok_or(SnapshotError::EmptyEntry)?;
        let peg = Triangle::from_letter(c).ok_or(SnapshotError::InvalidTriangle(c))?;
        let pos = parse_position(chars.as_str())?;
        placements.push(Placement { x: pos.x, y: pos.y, peg });
    }
    Ok(Snapshot(placements))
}
