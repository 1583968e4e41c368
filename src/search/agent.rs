//! Bot turns against a live match.

use tracing::debug;

use super::greedy::{best_move, BotMove};
use crate::board::PlayerId;
use crate::eval::HeuristicConfig;
use crate::game::Match;
use crate::movegen::Route;

/// Plays moves for bot-controlled players.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotAgent {
    config: HeuristicConfig,
}

impl BotAgent {
    pub fn new(config: HeuristicConfig) -> Self {
        BotAgent { config }
    }

    /// Picks the best move for `player` without touching the match.
    pub fn choose(&self, game: &Match, player: PlayerId) -> Option<BotMove> {
        let p = game.player(player)?;
        best_move(
            game.grid(),
            game.state(),
            p.triangle,
            &game.active_triangles(),
            &self.config,
        )
    }

    /// Plays the turn player's move.
    ///
    /// Commits the best move and returns its route; the caller still has to
    /// signal `complete_move`. With no legal move the turn is passed instead
    /// and `None` is returned. Does nothing while the match is locked.
    pub fn play(&self, game: &mut Match) -> Option<Route> {
        if game.is_locked() {
            return None;
        }
        let player = game.turn_player()?;
        let Some(choice) = self.choose(game, player) else {
            debug!(%player, "bot has no legal move, passing");
            game.next_turn();
            return None;
        };

        let grid = game.grid();
        let src = grid.position(choice.route.src);
        let dest = grid.position(choice.route.dest);
        debug!(%player, %src, %dest, score = choice.score, "bot move");
        game.move_piece(player, src, dest)
    }
}
