//! Headless bot match CLI.
//!
//! Plays all-bot Chinese Checkers matches and outputs one JSON record per
//! match (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of matches to play (default: 10)
//!   --players N       Bots per match, 1-6 (default: 6)
//!   --max-turns N     Turn cap per match (default: 2000)
//!   --random-plies N  Opening turns played at random (default: 0)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use sternhalma::selfplay::{self, SelfPlayConfig};
use tracing::{error, info};

struct Args {
    config: SelfPlayConfig,
    output_path: Option<String>,
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

/// Parses the command line. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut config = SelfPlayConfig::default();
    let mut output_path = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" => {
                i += 1;
                config.num_games = value(args, i, flag)?;
            }
            "--players" => {
                i += 1;
                config.players = value(args, i, flag)?;
                if !(1..=6).contains(&config.players) {
                    return Err(format!("--players must be between 1 and 6, got {}", config.players));
                }
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = value(args, i, flag)?;
            }
            "--random-plies" => {
                i += 1;
                config.random_plies = value(args, i, flag)?;
            }
            "--threads" => {
                i += 1;
                config.threads = value(args, i, flag)?;
            }
            "--seed" => {
                i += 1;
                config.seed = value(args, i, flag)?;
            }
            "--output" => {
                i += 1;
                output_path = Some(value(args, i, flag)?);
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(Args { config, output_path }))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = env::args().collect();
    let Args { config, output_path } = match parse_args(&args) {
        Ok(Some(a)) => a,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        info!(
            "Self-play: {} games, {} players, max {} turns, {} random plies, {} threads",
            config.num_games, config.players, config.max_turns, config.random_plies, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            error!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        info!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(1e-9) * 3600.0
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|f| selfplay::write_jsonl(&games, &mut BufWriter::new(f))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        info!("Wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of matches to play (default: 10)");
    eprintln!("  --players N       Bots per match, 1-6 (default: 6)");
    eprintln!("  --max-turns N     Turn cap per match (default: 2000)");
    eprintln!("  --random-plies N  Opening turns played at random (default: 0)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
