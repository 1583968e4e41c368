//! Roster construction for bot matches.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Player, PlayerId, ALL_COLORS, ALL_TRIANGLES};
use crate::eval::HeuristicConfig;

/// One local human (id 0) against five bots named "BOT 1" to "BOT 5".
///
/// Triangles and colours are shuffled; the result is sorted by triangle.
pub fn bot_match_roster(human_name: &str, config: HeuristicConfig, rng: &mut impl Rng) -> Vec<Player> {
    let mut triangles = ALL_TRIANGLES;
    let mut colors = ALL_COLORS;
    triangles.shuffle(rng);
    colors.shuffle(rng);

    let mut players: Vec<Player> = (0..ALL_TRIANGLES.len())
        .map(|i| {
            let id = PlayerId(i as u8);
            if i == 0 {
                Player::human(id, human_name, colors[i], triangles[i])
            } else {
                Player::bot(id, format!("BOT {}", i), colors[i], triangles[i], config)
            }
        })
        .collect();
    players.sort_by_key(|p| p.triangle);
    players
}

/// `count` bots on shuffled triangles, sorted by triangle. Counts above six
/// are clamped.
pub fn bot_roster(count: usize, config: HeuristicConfig, rng: &mut impl Rng) -> Vec<Player> {
    let mut triangles = ALL_TRIANGLES;
    let mut colors = ALL_COLORS;
    triangles.shuffle(rng);
    colors.shuffle(rng);

    let mut players: Vec<Player> = (0..count.min(ALL_TRIANGLES.len()))
        .map(|i| Player::bot(PlayerId(i as u8), format!("BOT {}", i + 1), colors[i], triangles[i], config))
        .collect();
    players.sort_by_key(|p| p.triangle);
    players
}
