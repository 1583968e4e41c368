//! One-ply greedy move selection.
//!
//! Every legal route of every piece is scored with the distance heuristic
//! and the lowest score wins. Pieces are visited in cell order and routes in
//! discovery order; the first candidate keeps a tie.

use crate::board::{BoardState, Grid, Triangle};
use crate::eval::{score_move, target_cell, HeuristicConfig};
use crate::movegen::{legal_routes, Route};

/// A chosen route and its heuristic score (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct BotMove {
    pub route: Route,
    pub score: f64,
}

/// Returns the best-scoring legal move for `triangle`, or `None` if no piece
/// can move.
pub fn best_move(
    grid: &Grid,
    state: &BoardState,
    triangle: Triangle,
    active: &[Triangle],
    config: &HeuristicConfig,
) -> Option<BotMove> {
    let home = triangle.home();
    let target = target_cell(grid, state, triangle, config);
    let pieces = state.occupants_of(triangle);

    let mut best: Option<BotMove> = None;
    for &piece in &pieces {
        for route in legal_routes(grid, state, triangle, active, piece) {
            let score = score_move(grid, config, home, &pieces, piece, route.dest, target);
            if best.as_ref().map_or(true, |b| score < b.score) {
                best = Some(BotMove { route, score });
            }
        }
    }
    best
}
