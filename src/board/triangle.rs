//! Triangle identifiers and the static zone table.
//!
//! The six star points are named A through F, starting at the top of the
//! board and continuing clockwise. Each point is a ten-cell zone; the zone
//! diametrically across the board is the home (win target) of the player
//! who starts on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of cells in each triangle zone.
pub const ZONE_SIZE: usize = 10;

/// Number of triangles on the board.
pub const TRIANGLE_COUNT: usize = 6;

/// One of the six star points.
///
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Triangle {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

/// All triangles in turn order.
pub const ALL_TRIANGLES: [Triangle; TRIANGLE_COUNT] = [
    Triangle::A,
    Triangle::B,
    Triangle::C,
    Triangle::D,
    Triangle::E,
    Triangle::F,
];

impl Triangle {
    /// Returns the single-letter name of this triangle.
    pub const fn letter(self) -> char {
        match self {
            Triangle::A => 'A',
            Triangle::B => 'B',
            Triangle::C => 'C',
            Triangle::D => 'D',
            Triangle::E => 'E',
            Triangle::F => 'F',
        }
    }

    /// Parses a triangle from its single-letter name.
    pub fn from_letter(c: char) -> Option<Triangle> {
        match c {
            'A' => Some(Triangle::A),
            'B' => Some(Triangle::B),
            'C' => Some(Triangle::C),
            'D' => Some(Triangle::D),
            'E' => Some(Triangle::E),
            'F' => Some(Triangle::F),
            _ => None,
        }
    }

    /// Parses a triangle name, failing with `InvalidTriangle` for anything
    /// other than a single letter A-F.
    pub fn from_name(name: &str) -> Result<Triangle, GameError> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Triangle::from_letter(c).ok_or_else(|| GameError::InvalidTriangle(name.to_string()))
            }
            _ => Err(GameError::InvalidTriangle(name.to_string())),
        }
    }

    /// Returns the triangle across the board: the home zone of a player
    /// assigned to `self`.
    pub const fn home(self) -> Triangle {
        match self {
            Triangle::A => Triangle::D,
            Triangle::B => Triangle::E,
            Triangle::C => Triangle::F,
            Triangle::D => Triangle::A,
            Triangle::E => Triangle::B,
            Triangle::F => Triangle::C,
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Triangle {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Triangle::from_name(s)
    }
}

/// Static membership record for a triangle zone.
///
/// Indices refer to cells in row-major board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneSpec {
    pub triangle: Triangle,
    /// Apex cell furthest from the board centre.
    pub peak: u8,
    pub cells: [u8; ZONE_SIZE],
}

/// Compile-time zone table: index by `Triangle as usize`.
pub static ZONES: [ZoneSpec; TRIANGLE_COUNT] = [
    ZoneSpec { triangle: Triangle::A, peak: 0, cells: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9] },
    ZoneSpec { triangle: Triangle::B, peak: 22, cells: [19, 20, 21, 22, 32, 33, 34, 44, 45, 55] },
    ZoneSpec { triangle: Triangle::C, peak: 110, cells: [74, 84, 85, 95, 96, 97, 107, 108, 109, 110] },
    ZoneSpec { triangle: Triangle::D, peak: 120, cells: [111, 112, 113, 114, 115, 116, 117, 118, 119, 120] },
    ZoneSpec { triangle: Triangle::E, peak: 98, cells: [65, 75, 76, 86, 87, 88, 98, 99, 100, 101] },
    ZoneSpec { triangle: Triangle::F, peak: 10, cells: [10, 11, 12, 13, 23, 24, 25, 35, 36, 46] },
];
