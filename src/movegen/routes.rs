//! Reachability search for a single move.
//!
//! A move is either one step onto an empty neighbour or a chain of one or
//! more jumps, each over an adjacent occupied cell onto the empty cell
//! directly beyond it. The search is a depth-first walk over jump landings;
//! all scratch state (parents, visited flags) is local to one call.

use crate::board::{BoardState, Cell, Grid, CELL_COUNT};

/// A reachable destination and the cells visited on the way there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub src: Cell,
    pub dest: Cell,
    /// Every cell from `src` to `dest` inclusive.
    pub path: Vec<Cell>,
}

impl Route {
    /// Number of hops (1 for a single step or a single jump).
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Returns every destination reachable from `src` before rule filtering.
///
/// Destinations are unique and listed in discovery order: single steps
/// first, then jump landings as the search pops them. A cell reachable both
/// by a step and by a jump chain keeps the single-step path.
pub fn reachable(grid: &Grid, state: &BoardState, src: Cell) -> Vec<Route> {
    let mut routes = Vec::new();
    let mut listed = [false; CELL_COUNT];
    let mut queued = [false; CELL_COUNT];
    let mut parent: [Option<Cell>; CELL_COUNT] = [None; CELL_COUNT];

    for &adj in grid.neighbors(src) {
        if state.is_empty(adj) {
            listed[adj.index()] = true;
            routes.push(Route {
                src,
                dest: adj,
                path: vec![src, adj],
            });
        }
    }

    let mut stack = vec![src];
    queued[src.index()] = true;

    while let Some(curr) = stack.pop() {
        if curr != src && !listed[curr.index()] {
            listed[curr.index()] = true;
            routes.push(Route {
                src,
                dest: curr,
                path: trace(&parent, src, curr),
            });
        }

        for jump in grid.jumps(curr) {
            if state.is_empty(jump.over) {
                continue;
            }
            let landing = jump.landing;
            if !state.is_empty(landing) || queued[landing.index()] {
                continue;
            }
            queued[landing.index()] = true;
            parent[landing.index()] = Some(curr);
            stack.push(landing);
        }
    }

    routes
}

/// Rebuilds the jump chain from `src` to `dest` by walking parent links.
fn trace(parent: &[Option<Cell>; CELL_COUNT], src: Cell, dest: Cell) -> Vec<Cell> {
    let mut path = vec![dest];
    let mut curr = dest;
    while curr != src {
        match parent[curr.index()] {
            Some(p) => {
                path.push(p);
                curr = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
