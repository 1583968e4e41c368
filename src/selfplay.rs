//! Headless bot-versus-bot matches.
//!
//! Plays complete all-bot matches on the real match controller, signalling
//! move completion immediately, and records seats, finishing order, turn
//! count and each seat's final distance to its home. Records are written as
//! JSONL.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{PegColor, Triangle, ALL_TRIANGLES};
use crate::error::GameError;
use crate::eval::{evaluate, HeuristicConfig};
use crate::game::{bot_roster, Match, MatchMode, MatchPhase};
use crate::movegen::random_route;
use crate::search::BotAgent;

/// Configuration for headless match generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Bots per match (1-6).
    pub players: usize,
    /// Turn cap; a match still running at the cap is recorded as unfinished.
    pub max_turns: u32,
    /// Opening turns played with a uniformly random legal move.
    pub random_plies: u32,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress output.
    pub quiet: bool,
    /// Heuristic settings shared by every bot.
    pub heuristic: HeuristicConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 6,
            max_turns: 2000,
            random_plies: 0,
            threads: 4,
            seed: 0,
            quiet: false,
            heuristic: HeuristicConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One seat of a finished record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatRecord {
    pub triangle: Triangle,
    pub name: String,
    pub color: PegColor,
    /// Finishing place, `None` if the seat never finished.
    pub rank: Option<u8>,
    /// Total distance of the seat's pieces to its home target at the end.
    pub distance: f64,
}

/// A complete match record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seats: Vec<SeatRecord>,
    /// Finishers, best first.
    pub ranking: Vec<Triangle>,
    /// Turns played, passes included.
    pub turns: u32,
    /// Whether the match ended before the turn cap.
    pub finished: bool,
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single match and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> Result<GameRecord, GameError> {
    let mut game = Match::new(MatchMode::Bot);
    game.new_game(bot_roster(config.players, config.heuristic, rng))?;
    let agent = BotAgent::new(config.heuristic);

    let mut turns = 0;
    while game.phase() == MatchPhase::InProgress && turns < config.max_turns {
        let Some(player) = game.turn_player() else {
            break;
        };
        let committed = if turns < config.random_plies {
            play_random(&mut game, rng)
        } else {
            agent.play(&mut game).is_some()
        };
        if committed {
            game.complete_move();
        }
        for event in game.drain_events() {
            debug!(game_id, ?event, "event");
        }
        debug!(game_id, turn = turns, %player, committed, "turn played");
        turns += 1;
    }

    let grid = game.grid();
    let seats = game
        .players()
        .iter()
        .map(|p| SeatRecord {
            triangle: p.triangle,
            name: p.name.clone(),
            color: p.color,
            rank: p.rank,
            distance: evaluate(grid, game.state(), p.triangle, &config.heuristic),
        })
        .collect();
    let ranking = game
        .ranking()
        .iter()
        .filter_map(|&id| game.player(id))
        .map(|p| p.triangle)
        .collect();

    Ok(GameRecord {
        game_id,
        seats,
        ranking,
        turns,
        finished: game.phase() == MatchPhase::Finished,
    })
}

/// Plays a uniformly random legal move for the turn player, or passes.
/// Returns true if a move was committed.
fn play_random(game: &mut Match, rng: &mut SmallRng) -> bool {
    let Some(player) = game.turn_player() else {
        return false;
    };
    let Some(triangle) = game.player(player).map(|p| p.triangle) else {
        return false;
    };
    let grid = game.grid();
    let route = random_route(grid, game.state(), triangle, &game.active_triangles(), rng);
    match route {
        Some(r) => game
            .move_piece(player, grid.position(r.src), grid.position(r.dest))
            .is_some(),
        None => {
            game.next_turn();
            false
        }
    }
}

fn log_game(config: &SelfPlayConfig, game: &GameRecord, done: usize, started: Instant) {
    if config.quiet {
        return;
    }
    let winner = game.ranking.first().map_or("none".to_string(), |t| t.to_string());
    info!(
        "Game {}/{}: winner {} after {} turns{} ({:.1}s)",
        done,
        config.num_games,
        winner,
        game.turns,
        if game.finished { "" } else { " (turn cap)" },
        started.elapsed().as_secs_f64(),
    );
}

/// Plays `config.num_games` matches.
///
/// With a non-zero seed every match gets its own seed derived from its id,
/// so results do not depend on the thread count. When `config.threads > 1`
/// matches run concurrently on a rayon pool.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads <= 1 {
        let mut games = Vec::with_capacity(config.num_games);
        for i in 0..config.num_games {
            let started = Instant::now();
            let game = play_game(config, i, &mut game_rng(config, i))?;
            log_game(config, &game, i + 1, started);
            games.push(game);
        }
        return Ok(games);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, GameError> {
                let started = Instant::now();
                let game = play_game(config, i, &mut game_rng(config, i))?;
                log_game(config, &game, i + 1, started);
                Ok(game)
            })
            .collect::<Result<Vec<_>, GameError>>()
    })?;
    Ok(games)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let finished = games.iter().filter(|g| g.finished).count();
    let turns: u64 = games.iter().map(|g| g.turns as u64).sum();

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Finished before turn cap: {}", finished);
    eprintln!("Avg turns/game: {:.1}", turns as f64 / total.max(1) as f64);
    eprintln!("Win distribution:");
    for t in ALL_TRIANGLES {
        let wins = games.iter().filter(|g| g.ranking.first() == Some(&t)).count();
        let pct = 100.0 * wins as f64 / total.max(1) as f64;
        eprintln!("  {}: {} ({:.1}%)", t, wins, pct);
    }
}
