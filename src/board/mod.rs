//! Board representation and game-state types.
//!
//! Contains the static star topology, the triangle zones, per-cell
//! occupancy, and player records.

pub mod grid;
pub mod player;
pub mod state;
pub mod triangle;

pub use grid::{Cell, Direction, Grid, Jump, Position, ALL_DIRECTIONS, CELL_COUNT, ROWS};
pub use player::{PegColor, Player, PlayerId, PlayerKind, ALL_COLORS};
pub use state::{BoardState, Placement, Snapshot};
pub use triangle::{Triangle, ZoneSpec, ALL_TRIANGLES, TRIANGLE_COUNT, ZONES, ZONE_SIZE};
