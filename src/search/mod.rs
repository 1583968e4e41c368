//! Bot move selection.
//!
//! `greedy` scores every legal route with the distance heuristic;
//! `agent` applies the chosen move to a live match.

pub mod agent;
pub mod greedy;

pub use agent::BotAgent;
pub use greedy::{best_move, BotMove};
