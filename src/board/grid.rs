//! Static board topology.
//!
//! The board is a 121-cell six-pointed star laid out on a skewed grid:
//! cells in the same row are two x-units apart and diagonal neighbours
//! differ by one unit on each axis.
//!
//! ```text
//!          .    (0,0)   .
//!        (-1,1)   .   (1,1)
//! (-2,2)   .    (0,2)   .   (2,2)
//! ```
//!
//! Design: every per-cell table (positions, zones, neighbours, jumps) is a
//! dense vector indexed by `Cell`. The standard grid is computed once via
//! `LazyLock` and shared for the lifetime of the process.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::triangle::{Triangle, ZoneSpec, ALL_TRIANGLES, TRIANGLE_COUNT, ZONES, ZONE_SIZE};
use crate::error::GameError;

/// Number of cells on the standard board.
pub const CELL_COUNT: usize = 121;

/// Number of cells in each row of the standard board, top to bottom.
pub const ROWS: [usize; 17] = [1, 2, 3, 4, 13, 12, 11, 10, 9, 10, 11, 12, 13, 4, 3, 2, 1];

/// A board coordinate on the skewed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Euclidean distance in raw grid units.
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Dense index of a board cell, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

impl Cell {
    /// Returns the cell with the given index, or None if it is off the board.
    pub fn from_index(index: usize) -> Option<Cell> {
        if index < CELL_COUNT {
            Some(Cell(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The six neighbour directions, in the order adjacency is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::West,
    Direction::East,
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthWest,
    Direction::SouthEast,
];

impl Direction {
    /// Returns the (dx, dy) offset to the neighbour in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::West => (-2, 0),
            Direction::East => (2, 0),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// A jump over an adjacent cell onto the cell directly beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub over: Cell,
    pub landing: Cell,
}

/// Immutable board topology and zone membership.
#[derive(Debug, Clone)]
pub struct Grid {
    positions: Vec<Position>,
    zones: Vec<Option<Triangle>>,
    neighbors: Vec<Vec<Cell>>,
    jumps: Vec<Vec<Jump>>,
    zone_cells: [[Cell; ZONE_SIZE]; TRIANGLE_COUNT],
    peaks: [Cell; TRIANGLE_COUNT],
    lookup: Vec<Option<Cell>>,
    min_x: i32,
    columns: i32,
    rows: i32,
}

static STANDARD: LazyLock<Grid> = LazyLock::new(|| {
    Grid::new(&ROWS, &ZONES).expect("standard row and zone tables are consistent")
});

impl Grid {
    /// Returns the process-wide standard board.
    pub fn standard() -> &'static Grid {
        &STANDARD
    }

    /// Builds a grid from a row-width profile and a zone table.
    ///
    /// Fails with `GameError::Configuration` if the profile does not yield
    /// `CELL_COUNT` cells, or the zone table is out of order, out of range,
    /// overlapping, or names a peak outside its own zone.
    pub fn new(rows: &[usize], zone_specs: &[ZoneSpec]) -> Result<Grid, GameError> {
        let mut positions = Vec::with_capacity(CELL_COUNT);
        for (y, &width) in rows.iter().enumerate() {
            let mut x = if y > 0 { 1 - width as i32 } else { 0 };
            for _ in 0..width {
                positions.push(Position::new(x, y as i32));
                x += 2;
            }
        }
        if positions.len() != CELL_COUNT {
            return Err(GameError::Configuration(format!(
                "row profile yields {} cells, expected {}",
                positions.len(),
                CELL_COUNT
            )));
        }

        let zones = assign_zones(zone_specs)?;

        let min_x = positions.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = positions.iter().map(|p| p.x).max().unwrap_or(0);
        let columns = max_x - min_x + 1;
        let row_count = rows.len() as i32;
        let mut lookup = vec![None; (columns * row_count) as usize];
        for (i, p) in positions.iter().enumerate() {
            lookup[(p.y * columns + p.x - min_x) as usize] = Some(Cell(i as u8));
        }

        let mut grid = Grid {
            positions,
            zones,
            neighbors: Vec::with_capacity(CELL_COUNT),
            jumps: Vec::with_capacity(CELL_COUNT),
            zone_cells: [[Cell(0); ZONE_SIZE]; TRIANGLE_COUNT],
            peaks: [Cell(0); TRIANGLE_COUNT],
            lookup,
            min_x,
            columns,
            rows: row_count,
        };

        for spec in zone_specs {
            let t = spec.triangle as usize;
            grid.peaks[t] = Cell(spec.peak);
            for (k, &idx) in spec.cells.iter().enumerate() {
                grid.zone_cells[t][k] = Cell(idx);
            }
        }

        for i in 0..CELL_COUNT {
            let p = grid.positions[i];
            let mut adj = Vec::with_capacity(6);
            let mut jumps = Vec::with_capacity(6);
            for dir in ALL_DIRECTIONS {
                let (dx, dy) = dir.offset();
                let Some(over) = grid.cell_at(Position::new(p.x + dx, p.y + dy)) else {
                    continue;
                };
                adj.push(over);
                if let Some(landing) = grid.cell_at(Position::new(p.x + 2 * dx, p.y + 2 * dy)) {
                    jumps.push(Jump { over, landing });
                }
            }
            grid.neighbors.push(adj);
            grid.jumps.push(jumps);
        }

        Ok(grid)
    }

    /// Iterates over every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(|i| Cell(i as u8))
    }

    /// Looks up the cell at a coordinate.
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        if pos.y < 0 || pos.y >= self.rows || pos.x < self.min_x || pos.x >= self.min_x + self.columns {
            return None;
        }
        self.lookup[(pos.y * self.columns + pos.x - self.min_x) as usize]
    }

    #[inline]
    pub fn position(&self, cell: Cell) -> Position {
        self.positions[cell.index()]
    }

    /// Returns the triangle zone containing the cell, or None for the
    /// neutral centre field.
    #[inline]
    pub fn zone(&self, cell: Cell) -> Option<Triangle> {
        self.zones[cell.index()]
    }

    /// Returns the existing neighbours of a cell (between 2 and 6).
    #[inline]
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        &self.neighbors[cell.index()]
    }

    /// Returns every jump whose landing cell exists on the board.
    #[inline]
    pub fn jumps(&self, cell: Cell) -> &[Jump] {
        &self.jumps[cell.index()]
    }

    /// Returns the landing cell for a jump from `from` over `over`, if the
    /// two are adjacent and the landing exists.
    pub fn jump_landing(&self, from: Cell, over: Cell) -> Option<Cell> {
        self.jumps(from)
            .iter()
            .find(|j| j.over == over)
            .map(|j| j.landing)
    }

    pub fn is_adjacent(&self, a: Cell, b: Cell) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Returns the ten cells of a triangle zone in table order.
    #[inline]
    pub fn zone_cells(&self, triangle: Triangle) -> &[Cell; ZONE_SIZE] {
        &self.zone_cells[triangle as usize]
    }

    #[inline]
    pub fn peak(&self, triangle: Triangle) -> Cell {
        self.peaks[triangle as usize]
    }
}

/// Validates a zone table and returns the per-cell zone tags.
fn assign_zones(zone_specs: &[ZoneSpec]) -> Result<Vec<Option<Triangle>>, GameError> {
    if zone_specs.len() != TRIANGLE_COUNT {
        return Err(GameError::Configuration(format!(
            "expected {} zones, got {}",
            TRIANGLE_COUNT,
            zone_specs.len()
        )));
    }

    let mut zones: Vec<Option<Triangle>> = vec![None; CELL_COUNT];
    for (spec, expected) in zone_specs.iter().zip(ALL_TRIANGLES) {
        if spec.triangle != expected {
            return Err(GameError::Configuration(format!(
                "zone {} listed where {} was expected",
                spec.triangle, expected
            )));
        }
        for &idx in spec.cells.iter() {
            let idx = idx as usize;
            if idx >= CELL_COUNT {
                return Err(GameError::Configuration(format!(
                    "zone {} references cell {} outside [0,{}]",
                    spec.triangle,
                    idx,
                    CELL_COUNT - 1
                )));
            }
            if let Some(other) = zones[idx] {
                return Err(GameError::Configuration(format!(
                    "cell {} belongs to both zone {} and zone {}",
                    idx, other, spec.triangle
                )));
            }
            zones[idx] = Some(spec.triangle);
        }
        if !spec.cells.contains(&spec.peak) {
            return Err(GameError::Configuration(format!(
                "peak {} of zone {} is not a member of the zone",
                spec.peak, spec.triangle
            )));
        }
    }
    Ok(zones)
}
