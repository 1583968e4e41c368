use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sternhalma::board::{BoardState, Grid, ALL_TRIANGLES, ROWS, ZONES};
use sternhalma::eval::{evaluate, HeuristicConfig};
use sternhalma::game::{bot_roster, Match, MatchMode, MatchPhase};
use sternhalma::movegen::{reachable, routes_for};
use sternhalma::protocol::{encode_snapshot, parse_snapshot};
use sternhalma::search::{best_move, BotAgent};

use rand::rngs::SmallRng;
use rand::SeedableRng;

fn full_board() -> BoardState {
    let grid = Grid::standard();
    let mut state = BoardState::empty();
    for t in ALL_TRIANGLES {
        state.fill_zone(grid, t);
    }
    state
}

/// A crowded midgame position reached by bots from the start.
fn midgame_board() -> BoardState {
    let mut game = Match::new(MatchMode::Bot);
    let mut rng = SmallRng::seed_from_u64(7);
    game.new_game(bot_roster(6, HeuristicConfig::default(), &mut rng))
        .unwrap();
    let agent = BotAgent::default();
    for _ in 0..120 {
        if game.phase() != MatchPhase::InProgress {
            break;
        }
        if agent.play(&mut game).is_some() {
            game.complete_move();
        }
    }
    game.state().clone()
}

fn bench_grid(c: &mut Criterion) {
    c.bench_function("grid_build", |b| {
        b.iter(|| Grid::new(black_box(&ROWS), black_box(&ZONES)))
    });
}

fn bench_routes(c: &mut Criterion) {
    let grid = Grid::standard();
    let start = full_board();
    let mid = midgame_board();

    c.bench_function("routes_start_one_side", |b| {
        b.iter(|| routes_for(grid, black_box(&start), ALL_TRIANGLES[0], &ALL_TRIANGLES))
    });

    c.bench_function("routes_midgame_all_sides", |b| {
        b.iter(|| {
            for t in ALL_TRIANGLES {
                black_box(routes_for(grid, black_box(&mid), t, &ALL_TRIANGLES));
            }
        })
    });

    c.bench_function("reachable_midgame_every_piece", |b| {
        b.iter(|| {
            for cell in grid.cells() {
                if !mid.is_empty(cell) {
                    black_box(reachable(grid, black_box(&mid), cell));
                }
            }
        })
    });
}

fn bench_bot(c: &mut Criterion) {
    let grid = Grid::standard();
    let mid = midgame_board();
    let config = HeuristicConfig::default();

    c.bench_function("best_move_midgame", |b| {
        b.iter(|| best_move(grid, black_box(&mid), ALL_TRIANGLES[2], &ALL_TRIANGLES, &config))
    });

    c.bench_function("evaluate_all_sides", |b| {
        b.iter(|| {
            ALL_TRIANGLES
                .iter()
                .map(|&t| evaluate(grid, black_box(&mid), t, &config))
                .sum::<f64>()
        })
    });
}

fn bench_notation(c: &mut Criterion) {
    let grid = Grid::standard();
    let text = encode_snapshot(&full_board().snapshot(grid));

    c.bench_function("snapshot_parse_and_load", |b| {
        b.iter(|| {
            let snap = parse_snapshot(black_box(&text)).unwrap();
            BoardState::from_snapshot(grid, &snap).unwrap()
        })
    });
}

fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    group.sample_size(10);
    group.bench_function("six_bots_120_turns", |b| {
        b.iter(|| black_box(midgame_board()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grid,
    bench_routes,
    bench_bot,
    bench_notation,
    bench_full_match
);
criterion_main!(benches);
