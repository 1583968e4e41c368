//! Property tests over random boards.

use proptest::prelude::*;

use sternhalma::board::{BoardState, Cell, Grid, Triangle, ALL_TRIANGLES, CELL_COUNT};
use sternhalma::game::controller::has_won;
use sternhalma::movegen::{legal_routes, Route};

fn board_strategy() -> impl Strategy<Value = BoardState> {
    prop::collection::vec(prop::option::weighted(0.4, 0..6usize), CELL_COUNT).prop_map(|occ| {
        let mut state = BoardState::empty();
        for (i, o) in occ.into_iter().enumerate() {
            if let Some(cell) = Cell::from_index(i) {
                state.set_occupant(cell, o.map(|t| ALL_TRIANGLES[t]));
            }
        }
        state
    })
}

fn triangle_strategy() -> impl Strategy<Value = Triangle> {
    (0..6usize).prop_map(|i| ALL_TRIANGLES[i])
}

/// Active triangles from a bit mask; the mover is always active.
fn active_from(mask: u8, mover: Triangle) -> Vec<Triangle> {
    ALL_TRIANGLES
        .into_iter()
        .enumerate()
        .filter(|&(i, t)| mask & (1 << i) != 0 || t == mover)
        .map(|(_, t)| t)
        .collect()
}

fn all_routes(grid: &Grid, state: &BoardState, mover: Triangle, active: &[Triangle]) -> Vec<Route> {
    state
        .occupants_of(mover)
        .into_iter()
        .flat_map(|src| legal_routes(grid, state, mover, active, src))
        .collect()
}

fn is_jump(grid: &Grid, state: &BoardState, from: Cell, to: Cell) -> bool {
    grid.jumps(from)
        .iter()
        .any(|j| j.landing == to && !state.is_empty(j.over))
}

#[test]
fn adjacency_is_symmetric() {
    let grid = Grid::standard();
    for a in grid.cells() {
        for &b in grid.neighbors(a) {
            assert!(grid.neighbors(b).contains(&a), "{:?} -> {:?}", a, b);
        }
    }
}

proptest! {
    /// Property: every route starts at its source, ends on an empty cell, and
    /// is either a single step or a chain of jumps over occupied cells.
    #[test]
    fn prop_routes_are_well_formed(
        state in board_strategy(),
        mover in triangle_strategy(),
        mask in any::<u8>()
    ) {
        let grid = Grid::standard();
        let active = active_from(mask, mover);
        for route in all_routes(grid, &state, mover, &active) {
            prop_assert_ne!(route.src, route.dest);
            prop_assert!(state.is_empty(route.dest));
            prop_assert_eq!(route.path.first(), Some(&route.src));
            prop_assert_eq!(route.path.last(), Some(&route.dest));
            let single_step = route.path.len() == 2 && grid.is_adjacent(route.src, route.dest);
            if !single_step {
                for pair in route.path.windows(2) {
                    prop_assert!(is_jump(grid, &state, pair[0], pair[1]));
                }
            }
        }
    }

    /// Property: each destination appears once per source.
    #[test]
    fn prop_destinations_are_unique(state in board_strategy(), mover in triangle_strategy()) {
        let grid = Grid::standard();
        for src in state.occupants_of(mover) {
            let routes = legal_routes(grid, &state, mover, &ALL_TRIANGLES, src);
            let mut dests: Vec<Cell> = routes.iter().map(|r| r.dest).collect();
            dests.sort();
            dests.dedup();
            prop_assert_eq!(dests.len(), routes.len());
        }
    }

    /// Property: a piece inside its home zone never leaves it.
    #[test]
    fn prop_home_lock(state in board_strategy(), mover in triangle_strategy()) {
        let grid = Grid::standard();
        let home = mover.home();
        for route in all_routes(grid, &state, mover, &ALL_TRIANGLES) {
            if grid.zone(route.src) == Some(home) {
                prop_assert_eq!(grid.zone(route.dest), Some(home));
            }
        }
    }

    /// Property: moves never stop in a zone that is the triangle or the home
    /// of another active player, except the mover's own zones.
    #[test]
    fn prop_foreign_zone_exclusion(
        state in board_strategy(),
        mover in triangle_strategy(),
        mask in any::<u8>()
    ) {
        let grid = Grid::standard();
        let active = active_from(mask, mover);
        for route in all_routes(grid, &state, mover, &active) {
            if let Some(zone) = grid.zone(route.dest) {
                let claimed = active.iter().any(|&p| p == zone || p.home() == zone);
                prop_assert!(
                    zone == mover || zone == mover.home() || !claimed,
                    "{} stopped in claimed zone {}", mover, zone
                );
            }
        }
    }

    /// Property: snapshots restore the exact board.
    #[test]
    fn prop_snapshot_round_trip(state in board_strategy()) {
        let grid = Grid::standard();
        let snapshot = state.snapshot(grid);
        prop_assert_eq!(snapshot.0.len(), state.piece_count());
        let restored = BoardState::from_snapshot(grid, &snapshot).unwrap();
        prop_assert_eq!(restored, state);
    }

    /// Property: a player has won exactly when its home is full and holds at
    /// least one of its own pieces.
    #[test]
    fn prop_win_condition(
        state in board_strategy(),
        mover in triangle_strategy(),
        fill in prop::collection::vec(0..6usize, 10)
    ) {
        let grid = Grid::standard();
        let home = grid.zone_cells(mover.home());

        let full = home.iter().all(|&c| !state.is_empty(c));
        let own = home.iter().any(|&c| state.occupant(c) == Some(mover));
        prop_assert_eq!(has_won(grid, &state, mover), full && own);

        // Fill the home completely from the random list.
        let mut filled = state.clone();
        for (&cell, &t) in home.iter().zip(&fill) {
            filled.set_occupant(cell, Some(ALL_TRIANGLES[t]));
        }
        let own = home.iter().any(|&c| filled.occupant(c) == Some(mover));
        prop_assert_eq!(has_won(grid, &filled, mover), own);
    }
}

#[test]
fn all_foreign_home_is_not_a_win() {
    let grid = Grid::standard();
    for t in ALL_TRIANGLES {
        let mut state = BoardState::empty();
        state.fill_zone(grid, t.home());
        assert!(!has_won(grid, &state, t));
    }
}
