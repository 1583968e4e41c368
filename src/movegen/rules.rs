//! Zone rules applied to raw reachability.
//!
//! Two rules restrict where a move may end:
//!
//! - a piece that has reached its home zone may not leave it;
//! - a move may not end inside a zone that belongs to another active player,
//!   either as that player's starting triangle or as its home.
//!
//! Jump chains may still pass through foreign zones.

use crate::board::{Cell, Grid, Triangle};

use super::routes::Route;

/// Returns whether a move by `mover` may end in a cell of `zone`.
pub fn may_end_in(zone: Option<Triangle>, mover: Triangle, active: &[Triangle]) -> bool {
    match zone {
        None => true,
        Some(z) if z == mover || z == mover.home() => true,
        Some(z) => !active.iter().any(|&p| p == z || p.home() == z),
    }
}

/// Filters raw routes from `src` down to the legal ones.
pub fn apply_zone_rules(
    grid: &Grid,
    mover: Triangle,
    active: &[Triangle],
    src: Cell,
    routes: Vec<Route>,
) -> Vec<Route> {
    let home = mover.home();
    let home_locked = grid.zone(src) == Some(home);

    routes
        .into_iter()
        .filter(|r| {
            let zone = grid.zone(r.dest);
            (!home_locked || zone == Some(home)) && may_end_in(zone, mover, active)
        })
        .collect()
}
