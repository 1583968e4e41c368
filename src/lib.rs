//! Sternhalma engine library.
//!
//! Exposes the board model, route engine, match controller, bot agent and
//! protocol modules for use by integration tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use error::GameError;
