//! Text protocol handling.
//!
//! Parsing and serialization for the line-oriented engine protocol: compact
//! notation for positions, paths and snapshots, and the command parser for
//! the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_snapshot, format_path, parse_position, parse_snapshot, SnapshotError};
pub use parser::{parse_command, Command, Seat};
