//! Legal move generation.
//!
//! Computes every destination a piece may reach this turn, with the path
//! used to get there, and applies the home-lock and foreign-zone rules.

pub mod routes;
pub mod rules;

use rand::Rng;

use crate::board::{BoardState, Cell, Grid, Triangle};

pub use routes::{reachable, Route};
pub use rules::{apply_zone_rules, may_end_in};

/// Returns every legal route for the piece on `src`.
///
/// `active` lists the triangles of players still in the turn rotation.
/// Returns an empty vec if `src` does not hold one of `mover`'s pieces or
/// the piece has nowhere to go.
pub fn legal_routes(
    grid: &Grid,
    state: &BoardState,
    mover: Triangle,
    active: &[Triangle],
    src: Cell,
) -> Vec<Route> {
    if state.occupant(src) != Some(mover) {
        return Vec::new();
    }
    let raw = reachable(grid, state, src);
    apply_zone_rules(grid, mover, active, src, raw)
}

/// Returns every legal route of every piece `mover` has on the board,
/// pieces in cell order.
pub fn routes_for(grid: &Grid, state: &BoardState, mover: Triangle, active: &[Triangle]) -> Vec<Route> {
    state
        .occupants_of(mover)
        .into_iter()
        .flat_map(|src| legal_routes(grid, state, mover, active, src))
        .collect()
}

/// Picks one legal route for `mover` uniformly at random.
pub fn random_route(
    grid: &Grid,
    state: &BoardState,
    mover: Triangle,
    active: &[Triangle],
    rng: &mut impl Rng,
) -> Option<Route> {
    let mut all = routes_for(grid, state, mover, active);
    if all.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..all.len());
    Some(all.swap_remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Position, ALL_TRIANGLES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(x: i32, y: i32) -> Cell {
        Grid::standard().cell_at(Position::new(x, y)).unwrap()
    }

    fn positions(routes: &[Route]) -> Vec<Position> {
        routes.iter().map(|r| Grid::standard().position(r.dest)).collect()
    }

    #[test]
    fn single_step_from_apex() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        let src = cell(0, 0);
        state.set_occupant(src, Some(Triangle::A));

        let routes = legal_routes(grid, &state, Triangle::A, &[Triangle::A], src);
        assert_eq!(positions(&routes), vec![Position::new(-1, 1), Position::new(1, 1)]);
        assert!(routes.iter().all(|r| r.steps() == 1));
    }

    #[test]
    fn source_must_hold_movers_piece() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        let src = cell(0, 8);
        assert!(legal_routes(grid, &state, Triangle::A, &[Triangle::A], src).is_empty());

        state.set_occupant(src, Some(Triangle::B));
        assert!(legal_routes(grid, &state, Triangle::A, &[Triangle::A, Triangle::B], src).is_empty());
    }

    #[test]
    fn walled_in_piece_has_no_moves() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        for t in ALL_TRIANGLES {
            state.fill_zone(grid, t);
        }
        // The apex piece of A is surrounded by its own pieces two deep.
        let routes = legal_routes(grid, &state, Triangle::A, &ALL_TRIANGLES, cell(0, 0));
        assert!(routes.is_empty());
    }

    #[test]
    fn home_lock_keeps_piece_inside_home() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        let src = cell(-3, 13);
        state.set_occupant(src, Some(Triangle::A));

        let raw = reachable(grid, &state, src);
        assert!(raw.iter().any(|r| grid.zone(r.dest).is_none()));

        let routes = legal_routes(grid, &state, Triangle::A, &[Triangle::A], src);
        assert_eq!(positions(&routes), vec![Position::new(-1, 13), Position::new(-2, 14)]);
        assert!(routes.iter().all(|r| grid.zone(r.dest) == Some(Triangle::D)));
    }

    #[test]
    fn foreign_zone_is_transit_only() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        let src = cell(7, 7);
        state.set_occupant(src, Some(Triangle::A));
        state.set_occupant(cell(8, 6), Some(Triangle::B));
        state.set_occupant(cell(7, 5), Some(Triangle::B));

        let active = [Triangle::A, Triangle::B];
        let routes = legal_routes(grid, &state, Triangle::A, &active, src);
        let dests = positions(&routes);
        assert!(!dests.contains(&Position::new(9, 7)));
        assert!(!dests.contains(&Position::new(9, 5)));

        let through = routes.iter().find(|r| r.dest == cell(5, 5)).unwrap();
        assert_eq!(through.path, vec![src, cell(9, 5), cell(5, 5)]);

        // With B out of the rotation its zone is open again.
        let routes = legal_routes(grid, &state, Triangle::A, &[Triangle::A], src);
        let dests = positions(&routes);
        assert!(dests.contains(&Position::new(9, 7)));
        assert!(dests.contains(&Position::new(9, 5)));
    }

    #[test]
    fn routes_for_covers_every_piece() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        state.fill_zone(grid, Triangle::A);
        let routes = routes_for(grid, &state, Triangle::A, &[Triangle::A]);
        // Only the front row and jumps out of it can move at the start.
        assert!(!routes.is_empty());
        assert!(routes.iter().all(|r| state.occupant(r.src) == Some(Triangle::A)));
        assert!(routes.iter().all(|r| state.is_empty(r.dest)));
    }

    #[test]
    fn random_route_is_legal_and_seeded() {
        let grid = Grid::standard();
        let mut state = BoardState::empty();
        state.fill_zone(grid, Triangle::A);
        let legal = routes_for(grid, &state, Triangle::A, &[Triangle::A]);

        for seed in 0..20 {
            let a = random_route(grid, &state, Triangle::A, &[Triangle::A], &mut StdRng::seed_from_u64(seed));
            let b = random_route(grid, &state, Triangle::A, &[Triangle::A], &mut StdRng::seed_from_u64(seed));
            assert_eq!(a, b);
            assert!(legal.contains(&a.unwrap()));
        }

        let empty = BoardState::empty();
        assert!(random_route(grid, &empty, Triangle::A, &[Triangle::A], &mut StdRng::seed_from_u64(1)).is_none());
    }
}
