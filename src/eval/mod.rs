//! Position evaluation.
//!
//! Scores candidate moves for a bot from its own perspective, using
//! straight-line distance to a target cell in its home zone.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, score_move, target_cell, HeuristicConfig};
