//! Player records.
//!
//! A player owns one triangle for the whole match. Human and bot players
//! share one record; the `PlayerKind` tag decides who chooses the moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::triangle::Triangle;
use crate::eval::HeuristicConfig;

/// Stable identifier of a player within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Peg colour shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PegColor {
    Red,
    Black,
    Pink,
    Blue,
    Green,
    Yellow,
}

pub const ALL_COLORS: [PegColor; 6] = [
    PegColor::Red,
    PegColor::Black,
    PegColor::Pink,
    PegColor::Blue,
    PegColor::Green,
    PegColor::Yellow,
];

/// Who chooses a player's moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerKind {
    Human,
    Bot(HeuristicConfig),
}

/// A participant in a match.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PegColor,
    pub triangle: Triangle,
    pub kind: PlayerKind,
    /// Finishing place, `None` while still playing.
    pub rank: Option<u8>,
    /// The piece currently picked up, if any.
    pub selected: Option<Cell>,
}

impl Player {
    pub fn human(id: PlayerId, name: impl Into<String>, color: PegColor, triangle: Triangle) -> Self {
        Player {
            id,
            name: name.into(),
            color,
            triangle,
            kind: PlayerKind::Human,
            rank: None,
            selected: None,
        }
    }

    pub fn bot(
        id: PlayerId,
        name: impl Into<String>,
        color: PegColor,
        triangle: Triangle,
        config: HeuristicConfig,
    ) -> Self {
        Player {
            kind: PlayerKind::Bot(config),
            ..Player::human(id, name, color, triangle)
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    /// Returns the triangle this player must fill to win.
    pub fn home(&self) -> Triangle {
        self.triangle.home()
    }

    /// Returns the heuristic settings of a bot, None for humans.
    pub fn bot_config(&self) -> Option<HeuristicConfig> {
        match self.kind {
            PlayerKind::Bot(config) => Some(config),
            PlayerKind::Human => None,
        }
    }
}
