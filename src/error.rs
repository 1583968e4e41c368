//! Engine error types.
//!
//! Only configuration and programmer errors are represented here. Illegal
//! user actions (moving out of turn, tapping a non-legal destination) are
//! silent no-ops and never produce a `GameError`.

use crate::board::grid::Position;
use crate::board::player::PlayerId;
use crate::board::triangle::Triangle;

/// Errors raised by board construction, match setup, and snapshot loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid board configuration: {0}")]
    Configuration(String),

    #[error("invalid triangle name '{0}'")]
    InvalidTriangle(String),

    #[error("invalid game mode '{0}'")]
    InvalidMode(String),

    #[error("triangle {0} is assigned to more than one player")]
    DuplicateTriangle(Triangle),

    #[error("{0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),

    #[error("a match needs at least one player")]
    EmptyRoster,

    #[error("no cell at position {0}")]
    UnknownPosition(Position),

    #[error("position {0} is listed more than once")]
    DuplicatePlacement(Position),
}
