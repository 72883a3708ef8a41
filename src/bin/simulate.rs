//! Headless match simulator.
//!
//! Plays whole matches with every human throw made automatically and
//! computer throws fired off the virtual clock, then prints per-match
//! results and win rates.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rust_pogs::core::{MatchConfig, Side, SideMap};
use rust_pogs::game::{MatchController, MatchSummary};
use rust_pogs::turns::TurnPhase;

/// Commands issued per match before giving up on it.
const MAX_STEPS: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Simulate pog matches")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "10")]
    matches: u32,

    /// Base seed; match `i` uses `seed + i`
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Match config as JSON (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter, e.g. `info` or `rust_pogs=debug` (falls back to
    /// `RUST_LOG`, then `warn`)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the final snapshot of each match as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<MatchConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let text = fs::read_to_string(path)?;
    let config: MatchConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Drive one match to completion.
fn play(game: &mut MatchController) -> Option<MatchSummary> {
    for _ in 0..MAX_STEPS {
        if game.is_match_over() {
            return game.match_summary();
        }
        match game.phase() {
            TurnPhase::AwaitingHumanThrow => {
                game.throw();
            }
            TurnPhase::AwaitingComputerThrow => {
                game.run_until_idle();
            }
            TurnPhase::RoundOver => {
                game.advance();
            }
        }
    }
    None
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = match args.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(args.config.as_ref())?;
    info!(matches = args.matches, seed = args.seed, "starting simulation");

    let mut wins: SideMap<u32> = SideMap::default();
    let mut unfinished = 0u32;

    for i in 0..args.matches {
        let seed = args.seed.wrapping_add(u64::from(i));
        let mut game = MatchController::new(config.clone(), seed)?;

        let Some(summary) = play(&mut game) else {
            warn!(seed, "match did not finish");
            unfinished += 1;
            continue;
        };
        wins[summary.winner] += 1;

        println!(
            "match {:>4} (seed {}): {} wins {}-{}, pogs {}-{}",
            i + 1,
            seed,
            summary.winner,
            summary.rounds_won[Side::A],
            summary.rounds_won[Side::B],
            summary.collection_sizes[Side::A],
            summary.collection_sizes[Side::B],
        );
        if args.json {
            println!("{}", serde_json::to_string(&game.snapshot())?);
        }
    }

    let finished = args.matches - unfinished;
    println!();
    for side in Side::ALL {
        let rate = if finished == 0 {
            0.0
        } else {
            f64::from(wins[side]) / f64::from(finished) * 100.0
        };
        println!("{side}: {} wins ({rate:.1}%)", wins[side]);
    }
    if unfinished > 0 {
        println!("{unfinished} matches did not finish");
    }
    Ok(())
}
