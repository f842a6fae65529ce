//! Self-play driver for the checkers engine
//!
//! Plays the engine against itself from a position and prints every move.
//! Set `RUST_LOG=debug` to see each completed search depth.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use checkers::{AIEngine, EngineConfig, GameState, SearchStrategy};

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Chinese checkers engine self-play")]
struct Args {
    /// Starting position in text format (default: initial position)
    #[arg(short, long)]
    position: Option<String>,

    /// Time limit per move in milliseconds
    #[arg(short, long, default_value_t = 2000)]
    time_ms: u64,

    /// Maximum search depth
    #[arg(short = 'd', long, default_value_t = 16)]
    max_depth: i8,

    /// Stop after this many plies
    #[arg(short = 'n', long, default_value_t = 200)]
    plies: u32,

    /// Use MTD(f) instead of full-window alpha-beta
    #[arg(long)]
    mtdf: bool,

    /// Transposition table size in megabytes
    #[arg(long, default_value_t = 64)]
    tt_mb: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut game = match args.position.as_deref() {
        Some(text) => text
            .parse::<GameState>()
            .with_context(|| format!("invalid position {text:?}"))?,
        None => GameState::new(),
    };

    let mut engine = AIEngine::with_config(EngineConfig {
        tt_size_mb: args.tt_mb,
        max_depth: args.max_depth,
        time_limit: Duration::from_millis(args.time_ms),
        strategy: if args.mtdf {
            SearchStrategy::Mtdf
        } else {
            SearchStrategy::AlphaBeta
        },
        ..EngineConfig::default()
    });

    println!("{game}");
    for _ in 0..args.plies {
        if game.is_game_over() {
            break;
        }
        let result = engine
            .get_move_with_stats(&game)
            .context("engine failed to move")?;
        let mover = game.turn();
        game.try_apply_move(result.best_move)
            .with_context(|| format!("engine played illegal move {}", result.best_move))?;
        println!(
            "{:?} {} (depth {}, score {}, {}ms)",
            mover, result.best_move, result.depth, result.score, result.time_ms
        );
        println!("{game}");
    }

    match game.winner() {
        Some(winner) => println!("{winner:?} wins in round {}", game.round()),
        None if game.is_game_over() => println!("{:?} cannot move", game.turn()),
        None => println!("stopped after {} plies", args.plies),
    }
    Ok(())
}
