//! Match control.
//!
//! Owns the roster, the turn rotation, move commits, and the ranking of
//! players as they fill their home zones.

pub mod controller;
pub mod roster;

use std::fmt;
use std::str::FromStr;

use crate::board::PlayerId;
use crate::error::GameError;

pub use controller::Match;
pub use roster::{bot_match_roster, bot_roster};

/// How a match is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// One local human against bots (or bots only). Players who finish are
    /// ranked and leave the rotation; the local human's finish ends the match.
    Bot,
    /// Remote players only; the match ends when one player is left.
    Multiplayer,
}

impl MatchMode {
    pub const fn name(self) -> &'static str {
        match self {
            MatchMode::Bot => "bot",
            MatchMode::Multiplayer => "multiplayer",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bot" => Ok(MatchMode::Bot),
            "multiplayer" => Ok(MatchMode::Multiplayer),
            other => Err(GameError::InvalidMode(other.to_string())),
        }
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    Setup,
    InProgress,
    Finished,
}

/// Notifications for the presentation layer, drained with
/// `Match::drain_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    TurnChanged(PlayerId),
    /// The mover's animation finished and the move is settled.
    MoveExecuted(PlayerId),
    /// A non-local player filled its home and left the rotation.
    PlayerFinished { player: PlayerId, rank: u8 },
    /// The local player finished first.
    LocalWon(PlayerId),
    /// The local player finished behind others; `ranking` lists every
    /// finisher so far, best first.
    LocalLost {
        player: PlayerId,
        rank: u8,
        ranking: Vec<PlayerId>,
    },
    /// A match without a local player ended.
    MatchOver { ranking: Vec<PlayerId> },
}
