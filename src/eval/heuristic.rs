//! Distance-based move scoring for bots.
//!
//! A bot aims every piece at a single target cell in its home zone and
//! prefers the move that leaves its pieces closest to that target in total.
//! Lower scores are better.

use crate::board::{BoardState, Cell, Grid, Position, Triangle};

/// Tunable weights for the bot heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicConfig {
    /// Board centre used to judge whether a move advances or retreats.
    pub center: Position,
    /// Added when a piece already home does not move away from the centre.
    pub retreat_penalty: f64,
    /// Subtracted when a move brings a piece into the home zone.
    pub entry_bonus: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            center: Position::new(0, 9),
            retreat_penalty: 100.0,
            entry_bonus: 100.0,
        }
    }
}

/// Picks the cell the bot steers towards.
///
/// This is the empty home cell farthest from the centre (first in zone
/// order on ties), or the home peak once the home is full.
pub fn target_cell(grid: &Grid, state: &BoardState, triangle: Triangle, config: &HeuristicConfig) -> Cell {
    let home = triangle.home();
    let mut best: Option<(Cell, f64)> = None;
    for &cell in grid.zone_cells(home) {
        if !state.is_empty(cell) {
            continue;
        }
        let d = grid.position(cell).distance(config.center);
        match best {
            Some((_, bd)) if d <= bd => {}
            _ => best = Some((cell, d)),
        }
    }
    best.map(|(c, _)| c).unwrap_or_else(|| grid.peak(home))
}

/// Scores moving `piece` to `dest` given the bot's current pieces.
pub fn score_move(
    grid: &Grid,
    config: &HeuristicConfig,
    home: Triangle,
    pieces: &[Cell],
    piece: Cell,
    dest: Cell,
    target: Cell,
) -> f64 {
    let target_pos = grid.position(target);
    let src_pos = grid.position(piece);
    let dest_pos = grid.position(dest);

    let mut score = dest_pos.distance(target_pos);

    let in_home = grid.zone(piece) == Some(home);
    if in_home && dest_pos.distance(config.center) <= src_pos.distance(config.center) {
        score += config.retreat_penalty;
    }
    if !in_home && grid.zone(dest) == Some(home) {
        score -= config.entry_bonus;
    }

    for &other in pieces {
        if other != piece {
            score += grid.position(other).distance(target_pos);
        }
    }
    score
}

/// Total distance of a triangle's pieces to its current target.
///
/// Zero means every piece sits on the target, which only happens for a lone
/// piece; a finished home scores the spread of ten pieces around the peak.
pub fn evaluate(grid: &Grid, state: &BoardState, triangle: Triangle, config: &HeuristicConfig) -> f64 {
    let target = grid.position(target_cell(grid, state, triangle, config));
    state
        .occupants_of(triangle)
        .into_iter()
        .map(|c| grid.position(c).distance(target))
        .sum()
}
