//! Runtime board occupancy.
//!
//! `BoardState` is a dumb store: it records which triangle's piece (if any)
//! sits on each cell and performs no legality checks. Move legality lives in
//! `movegen`, and only the match controller writes to the board.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, Position, CELL_COUNT};
use super::triangle::Triangle;
use crate::error::GameError;

/// One occupied cell in a snapshot.
///
/// The JSON form (`{"x":0,"y":16,"peg":"D"}`) matches scripted board data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub peg: Triangle,
}

impl Placement {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// The full list of occupied cells, in cell order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub Vec<Placement>);

/// Occupant of every cell, indexed by `Cell::index()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    occupants: [Option<Triangle>; CELL_COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::empty()
    }
}

impl BoardState {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        BoardState {
            occupants: [None; CELL_COUNT],
        }
    }

    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<Triangle> {
        self.occupants[cell.index()]
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.occupants[cell.index()].is_none()
    }

    /// Writes the occupant of a cell unconditionally.
    #[inline]
    pub fn set_occupant(&mut self, cell: Cell, occupant: Option<Triangle>) {
        self.occupants[cell.index()] = occupant;
    }

    /// Returns every cell holding one of the triangle's pieces, in cell order.
    pub fn occupants_of(&self, triangle: Triangle) -> Vec<Cell> {
        self.occupants
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == Some(triangle))
            .filter_map(|(i, _)| Cell::from_index(i))
            .collect()
    }

    /// Total number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        self.occupants = [None; CELL_COUNT];
    }

    /// Places a triangle's ten starting pieces on its own zone.
    pub fn fill_zone(&mut self, grid: &Grid, triangle: Triangle) {
        for &cell in grid.zone_cells(triangle) {
            self.set_occupant(cell, Some(triangle));
        }
    }

    /// Lists every occupied cell.
    pub fn snapshot(&self, grid: &Grid) -> Snapshot {
        let placements = grid
            .cells()
            .filter_map(|cell| {
                self.occupant(cell).map(|peg| {
                    let p = grid.position(cell);
                    Placement { x: p.x, y: p.y, peg }
                })
            })
            .collect();
        Snapshot(placements)
    }

    /// Builds a board from a snapshot. Cells not listed are empty.
    pub fn from_snapshot(grid: &Grid, snapshot: &Snapshot) -> Result<BoardState, GameError> {
        let mut state = BoardState::empty();
        for placement in &snapshot.0 {
            let pos = placement.position();
            let cell = grid.cell_at(pos).ok_or(GameError::UnknownPosition(pos))?;
            if !state.is_empty(cell) {
                return Err(GameError::DuplicatePlacement(pos));
            }
            state.set_occupant(cell, Some(placement.peg));
        }
        Ok(state)
    }
}
