//! The match controller.
//!
//! `Match` is the only writer of the board. A move is committed at once,
//! after which the match stays locked until the presentation layer reports
//! that the move's animation finished (`complete_move`). Settling a move
//! runs the ranking pipeline and passes the turn on.
//!
//! Illegal user actions (wrong turn, foreign piece, non-legal destination,
//! moving while locked) are silent no-ops: they return `None` or an empty
//! list, leave all state untouched, and are logged at debug level.

use tracing::{debug, info};

use super::{MatchEvent, MatchMode, MatchPhase};
use crate::board::{
    BoardState, Cell, Grid, Player, PlayerId, PlayerKind, Position, Snapshot, Triangle,
    TRIANGLE_COUNT,
};
use crate::error::GameError;
use crate::movegen::{legal_routes, Route};

/// Authoritative state of one match.
#[derive(Debug, Clone)]
pub struct Match {
    grid: &'static Grid,
    mode: MatchMode,
    phase: MatchPhase,
    state: BoardState,
    /// Every player, sorted by triangle.
    players: Vec<Player>,
    /// Players still taking turns, in turn order.
    rotation: Vec<PlayerId>,
    /// Index into `rotation`.
    turn: usize,
    /// Mover of a committed move awaiting its completion signal.
    pending: Option<PlayerId>,
    /// Finishers, best first.
    winners: Vec<PlayerId>,
    events: Vec<MatchEvent>,
}

impl Match {
    /// Creates an empty match in the setup phase.
    pub fn new(mode: MatchMode) -> Self {
        Match {
            grid: Grid::standard(),
            mode,
            phase: MatchPhase::Setup,
            state: BoardState::empty(),
            players: Vec::new(),
            rotation: Vec::new(),
            turn: 0,
            pending: None,
            winners: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Starts a new game with the given roster.
    ///
    /// Players are ordered by triangle; the first one moves first. Every
    /// player's ten pieces are placed on its own triangle.
    pub fn new_game(&mut self, mut players: Vec<Player>) -> Result<(), GameError> {
        if players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        let mut seen_triangles = [false; TRIANGLE_COUNT];
        for (i, p) in players.iter().enumerate() {
            if std::mem::replace(&mut seen_triangles[p.triangle as usize], true) {
                return Err(GameError::DuplicateTriangle(p.triangle));
            }
            if players[..i].iter().any(|q| q.id == p.id) {
                return Err(GameError::DuplicatePlayer(p.id));
            }
        }

        players.sort_by_key(|p| p.triangle);
        for p in players.iter_mut() {
            p.rank = None;
            p.selected = None;
        }

        self.state.clear();
        for p in &players {
            self.state.fill_zone(self.grid, p.triangle);
        }

        self.rotation = players.iter().map(|p| p.id).collect();
        self.players = players;
        self.turn = 0;
        self.pending = None;
        self.winners.clear();
        self.events.clear();
        self.phase = MatchPhase::InProgress;

        info!(
            mode = %self.mode,
            players = self.players.len(),
            first = %self.players[0].triangle,
            "new game"
        );
        Ok(())
    }

    pub fn grid(&self) -> &'static Grid {
        self.grid
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_triangle(&self, triangle: Triangle) -> Option<&Player> {
        self.players.iter().find(|p| p.triangle == triangle)
    }

    /// Players still taking turns, in turn order.
    pub fn rotation(&self) -> &[PlayerId] {
        &self.rotation
    }

    pub fn turn_player(&self) -> Option<PlayerId> {
        if self.phase != MatchPhase::InProgress {
            return None;
        }
        self.rotation.get(self.turn).copied()
    }

    /// True while a committed move waits for `complete_move`.
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    /// Finishers so far, best first.
    pub fn ranking(&self) -> &[PlayerId] {
        &self.winners
    }

    /// The human whose finish ends a bot match, if there is one.
    pub fn local_player(&self) -> Option<PlayerId> {
        if self.mode != MatchMode::Bot {
            return None;
        }
        self.players
            .iter()
            .find(|p| p.kind == PlayerKind::Human)
            .map(|p| p.id)
    }

    /// Triangles of the players still in the rotation.
    pub fn active_triangles(&self) -> Vec<Triangle> {
        self.rotation
            .iter()
            .filter_map(|&id| self.player(id))
            .map(|p| p.triangle)
            .collect()
    }

    /// Returns every legal route for `player`'s piece on `src`.
    pub fn legal_moves(&self, player: PlayerId, src: Position) -> Vec<Route> {
        let (Some(p), Some(cell)) = (self.player(player), self.grid.cell_at(src)) else {
            return Vec::new();
        };
        self.routes_from(p.triangle, cell)
    }

    fn routes_from(&self, triangle: Triangle, src: Cell) -> Vec<Route> {
        legal_routes(self.grid, &self.state, triangle, &self.active_triangles(), src)
    }

    /// Picks up one of the turn player's pieces and returns its legal routes
    /// as hints. Ignored (empty result) when locked, out of turn, or when
    /// `src` does not hold one of the player's pieces.
    pub fn select(&mut self, player: PlayerId, src: Position) -> Vec<Route> {
        if self.pending.is_some() || self.turn_player() != Some(player) {
            debug!(%player, %src, "select ignored: not this player's turn or locked");
            return Vec::new();
        }
        let Some(cell) = self.grid.cell_at(src) else {
            return Vec::new();
        };
        let Some(idx) = self.players.iter().position(|p| p.id == player) else {
            return Vec::new();
        };
        if self.state.occupant(cell) != Some(self.players[idx].triangle) {
            debug!(%player, %src, "select ignored: not the player's piece");
            return Vec::new();
        }
        self.players[idx].selected = Some(cell);
        self.routes_from(self.players[idx].triangle, cell)
    }

    /// Moves the player's selected piece to `dest`.
    pub fn move_selected(&mut self, player: PlayerId, dest: Position) -> Option<Route> {
        let selected = self.player(player)?.selected?;
        let src = self.grid.position(selected);
        self.move_piece(player, src, dest)
    }

    /// Commits a move and locks the match until `complete_move`.
    ///
    /// Returns the committed route (for animation), or `None` with no state
    /// change if the move is not legal right now.
    pub fn move_piece(&mut self, player: PlayerId, src: Position, dest: Position) -> Option<Route> {
        if self.phase != MatchPhase::InProgress {
            debug!(%player, "move ignored: match not in progress");
            return None;
        }
        if self.pending.is_some() {
            debug!(%player, "move ignored: previous move still animating");
            return None;
        }
        if self.turn_player() != Some(player) {
            debug!(%player, "move ignored: not this player's turn");
            return None;
        }
        let triangle = self.player(player)?.triangle;
        let src_cell = self.grid.cell_at(src)?;
        let dest_cell = self.grid.cell_at(dest)?;
        if src_cell == dest_cell || !self.state.is_empty(dest_cell) {
            debug!(%player, %src, %dest, "move ignored: destination unavailable");
            return None;
        }

        let Some(route) = self
            .routes_from(triangle, src_cell)
            .into_iter()
            .find(|r| r.dest == dest_cell)
        else {
            debug!(%player, %src, %dest, "move ignored: not a legal destination");
            return None;
        };

        self.state.set_occupant(src_cell, None);
        self.state.set_occupant(dest_cell, Some(triangle));
        if let Some(p) = self.players.iter_mut().find(|p| p.id == player) {
            p.selected = None;
        }
        self.pending = Some(player);

        debug!(%player, %src, %dest, steps = route.steps(), "move committed");
        Some(route)
    }

    /// Settles the pending move once its animation finished: emits
    /// `MoveExecuted`, unlocks, ranks the mover if it has won, and passes the
    /// turn on. Does nothing without a pending move.
    pub fn complete_move(&mut self) {
        let Some(mover) = self.pending.take() else {
            return;
        };
        self.events.push(MatchEvent::MoveExecuted(mover));
        self.settle(mover);
    }

    /// Runs the ranking pipeline for the player whose move just settled.
    fn settle(&mut self, mover: PlayerId) {
        let Some(idx) = self.rotation.iter().position(|&p| p == mover) else {
            return;
        };
        let won = self.check_win(mover);

        if Some(mover) == self.local_player() {
            if won || self.rotation.len() == 1 {
                let rank = self.finish(mover);
                self.phase = MatchPhase::Finished;
                info!(%mover, rank, "local player finished");
                if rank == 1 {
                    self.events.push(MatchEvent::LocalWon(mover));
                } else {
                    self.events.push(MatchEvent::LocalLost {
                        player: mover,
                        rank,
                        ranking: self.winners.clone(),
                    });
                }
                return;
            }
            self.next_turn();
            return;
        }

        if !won {
            self.next_turn();
            return;
        }

        let rank = self.finish(mover);
        info!(%mover, rank, "player finished");
        self.events.push(MatchEvent::PlayerFinished { player: mover, rank });
        self.rotation.remove(idx);

        if self.local_player().is_none() && self.rotation.len() <= 1 {
            if let Some(&last) = self.rotation.first() {
                let rank = self.finish(last);
                self.events.push(MatchEvent::PlayerFinished { player: last, rank });
            }
            self.phase = MatchPhase::Finished;
            info!(ranking = ?self.winners, "match over");
            self.events.push(MatchEvent::MatchOver {
                ranking: self.winners.clone(),
            });
            return;
        }

        // The player after the mover slid into the mover's slot.
        self.turn = idx % self.rotation.len();
        self.events.push(MatchEvent::TurnChanged(self.rotation[self.turn]));
    }

    /// Records the next finishing place for a player.
    fn finish(&mut self, id: PlayerId) -> u8 {
        self.winners.push(id);
        let rank = self.winners.len() as u8;
        if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
            p.rank = Some(rank);
        }
        rank
    }

    /// Passes the turn to the next player in the rotation.
    ///
    /// Returns the new turn player, or `None` (no change) when the match is
    /// not in progress or a move is still animating.
    pub fn next_turn(&mut self) -> Option<PlayerId> {
        if self.phase != MatchPhase::InProgress || self.pending.is_some() || self.rotation.is_empty() {
            return None;
        }
        self.turn = (self.turn + 1) % self.rotation.len();
        let next = self.rotation[self.turn];
        self.events.push(MatchEvent::TurnChanged(next));
        Some(next)
    }

    /// Hands the turn to a specific player, for scripted boards.
    /// Returns false (no change) if the player is not in the rotation or a
    /// move is animating.
    pub fn set_turn(&mut self, player: PlayerId) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match self.rotation.iter().position(|&p| p == player) {
            Some(idx) => {
                self.turn = idx;
                true
            }
            None => false,
        }
    }

    /// True when every cell of the player's home is occupied and at least one
    /// of them holds the player's own piece.
    pub fn check_win(&self, player: PlayerId) -> bool {
        match self.player(player) {
            Some(p) => has_won(self.grid, &self.state, p.triangle),
            None => false,
        }
    }

    /// Lists every occupied cell.
    pub fn serialize_state(&self) -> Snapshot {
        self.state.snapshot(self.grid)
    }

    /// Replaces the board with a snapshot. Any pending move is dropped
    /// without a `MoveExecuted` notification.
    pub fn load_state(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        self.state = BoardState::from_snapshot(self.grid, snapshot)?;
        self.pending = None;
        Ok(())
    }

    /// Takes every queued notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Win test on a bare board: full home with at least one own piece.
pub fn has_won(grid: &Grid, state: &BoardState, triangle: Triangle) -> bool {
    let home = grid.zone_cells(triangle.home());
    home.iter().all(|&c| !state.is_empty(c)) && home.iter().any(|&c| state.occupant(c) == Some(triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PegColor, Placement};
    use crate::eval::HeuristicConfig;

    fn human(id: u8, t: Triangle) -> Player {
        Player::human(PlayerId(id), "guest", PegColor::Red, t)
    }

    fn bot(id: u8, t: Triangle) -> Player {
        Player::bot(PlayerId(id), format!("BOT {}", id), PegColor::Blue, t, HeuristicConfig::default())
    }

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Fills `home` with nine pieces of `filler` and one of `owner` on its peak.
    fn nearly_home(game: &Match, owner: Triangle, filler: Triangle) -> Snapshot {
        let grid = game.grid();
        let home = owner.home();
        let peak = grid.peak(home);
        let placements = grid
            .zone_cells(home)
            .iter()
            .map(|&c| {
                let p = grid.position(c);
                let peg = if c == peak { owner } else { filler };
                Placement { x: p.x, y: p.y, peg }
            })
            .collect();
        Snapshot(placements)
    }

    #[test]
    fn new_game_sorts_by_triangle_and_places_pieces() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![bot(1, Triangle::D), human(0, Triangle::B), bot(2, Triangle::F)])
            .unwrap();

        assert_eq!(game.phase(), MatchPhase::InProgress);
        let order: Vec<Triangle> = game.players().iter().map(|p| p.triangle).collect();
        assert_eq!(order, vec![Triangle::B, Triangle::D, Triangle::F]);
        assert_eq!(game.turn_player(), Some(PlayerId(0)));
        assert_eq!(game.state().piece_count(), 30);
        assert_eq!(game.state().occupants_of(Triangle::D).len(), 10);
        assert!(game.state().occupants_of(Triangle::A).is_empty());
        assert_eq!(game.local_player(), Some(PlayerId(0)));
    }

    #[test]
    fn new_game_rejects_bad_rosters() {
        let mut game = Match::new(MatchMode::Bot);
        assert_eq!(game.new_game(Vec::new()), Err(GameError::EmptyRoster));
        assert_eq!(
            game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::A)]),
            Err(GameError::DuplicateTriangle(Triangle::A))
        );
        assert_eq!(
            game.new_game(vec![human(0, Triangle::A), bot(0, Triangle::D)]),
            Err(GameError::DuplicatePlayer(PlayerId(0)))
        );
        assert_eq!(game.phase(), MatchPhase::Setup);
    }

    #[test]
    fn move_commits_and_locks_until_completion() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::D)]).unwrap();

        let route = game.move_piece(PlayerId(0), pos(-3, 3), pos(-4, 4)).unwrap();
        assert_eq!(route.steps(), 1);
        assert!(game.is_locked());
        let grid = game.grid();
        assert!(game.state().is_empty(grid.cell_at(pos(-3, 3)).unwrap()));
        assert_eq!(game.state().occupant(grid.cell_at(pos(-4, 4)).unwrap()), Some(Triangle::A));

        // Locked: further moves and turn changes are ignored.
        assert!(game.move_piece(PlayerId(0), pos(-1, 3), pos(-2, 4)).is_none());
        assert_eq!(game.next_turn(), None);
        assert!(game.drain_events().is_empty());

        game.complete_move();
        assert!(!game.is_locked());
        assert_eq!(
            game.drain_events(),
            vec![MatchEvent::MoveExecuted(PlayerId(0)), MatchEvent::TurnChanged(PlayerId(1))]
        );
        assert_eq!(game.turn_player(), Some(PlayerId(1)));
    }

    #[test]
    fn illegal_moves_are_silent_noops() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::D)]).unwrap();
        let before = game.state().clone();

        // Out of turn.
        assert!(game.move_piece(PlayerId(1), pos(-3, 13), pos(-4, 12)).is_none());
        // Opponent's piece.
        assert!(game.move_piece(PlayerId(0), pos(-3, 13), pos(-4, 12)).is_none());
        // Same cell, occupied cell, unreachable cell, off board.
        assert!(game.move_piece(PlayerId(0), pos(-3, 3), pos(-3, 3)).is_none());
        assert!(game.move_piece(PlayerId(0), pos(-3, 3), pos(-1, 3)).is_none());
        assert!(game.move_piece(PlayerId(0), pos(-3, 3), pos(0, 8)).is_none());
        assert!(game.move_piece(PlayerId(0), pos(-3, 3), pos(99, 3)).is_none());

        assert_eq!(game.state(), &before);
        assert!(!game.is_locked());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn next_turn_wraps() {
        let mut game = Match::new(MatchMode::Multiplayer);
        game.new_game(vec![human(0, Triangle::A), human(1, Triangle::C), human(2, Triangle::E)])
            .unwrap();
        assert_eq!(game.next_turn(), Some(PlayerId(1)));
        assert_eq!(game.next_turn(), Some(PlayerId(2)));
        assert_eq!(game.next_turn(), Some(PlayerId(0)));
        assert_eq!(game.drain_events().len(), 3);
    }

    #[test]
    fn select_returns_hints_and_moves_selected_piece() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::D)]).unwrap();

        assert!(game.select(PlayerId(1), pos(-3, 13)).is_empty());
        assert!(game.select(PlayerId(0), pos(-3, 13)).is_empty());

        let hints = game.select(PlayerId(0), pos(-3, 3));
        assert!(!hints.is_empty());
        assert_eq!(game.player(PlayerId(0)).unwrap().selected, game.grid().cell_at(pos(-3, 3)));

        let route = game.move_selected(PlayerId(0), pos(-4, 4)).unwrap();
        assert_eq!(route.dest, game.grid().cell_at(pos(-4, 4)).unwrap());
        assert_eq!(game.player(PlayerId(0)).unwrap().selected, None);
    }

    #[test]
    fn check_win_needs_full_home_with_own_piece() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::D)]).unwrap();
        // Home D is full of D pieces only: not a win for A.
        assert!(!game.check_win(PlayerId(0)));

        let snap = nearly_home(&game, Triangle::A, Triangle::D);
        game.load_state(&snap).unwrap();
        assert!(game.check_win(PlayerId(0)));

        // One hole in the home: not a win.
        let mut holed = snap.clone();
        holed.0.retain(|p| !(p.x == 0 && p.y == 14));
        game.load_state(&holed).unwrap();
        assert!(!game.check_win(PlayerId(0)));
    }

    #[test]
    fn local_player_win_ends_match() {
        let mut game = Match::new(MatchMode::Bot);
        game.new_game(vec![human(0, Triangle::A), bot(1, Triangle::D)]).unwrap();

        // A's home holds D pieces and A's peak piece, with a hole at (0,14)
        // that A's last piece can reach by jumping over (-1,13).
        let mut snap = nearly_home(&game, Triangle::A, Triangle::D);
        snap.0.retain(|p| !(p.x == 0 && p.y == 14));
        snap.0.push(Placement { x: -2, y: 12, peg: Triangle::A });
        game.load_state(&snap).unwrap();

        let route = game.move_piece(PlayerId(0), pos(-2, 12), pos(0, 14)).unwrap();
        assert_eq!(route.steps(), 1);
        assert_eq!(route.path.len(), 2);
        game.complete_move();

        assert_eq!(game.phase(), MatchPhase::Finished);
        assert_eq!(game.ranking(), &[PlayerId(0)]);
        assert_eq!(game.player(PlayerId(0)).unwrap().rank, Some(1));
        assert_eq!(
            game.drain_events(),
            vec![MatchEvent::MoveExecuted(PlayerId(0)), MatchEvent::LocalWon(PlayerId(0))]
        );
        assert_eq!(game.turn_player(), None);
    }
}
