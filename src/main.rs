//! Multiverse driver.
//!
//! Run with:
//! `cargo run` (scripted branch on the small puzzle)
//! `cargo run -- --random 40 --seed 7`
//! `cargo run -- --fen "3k/4/4/KN2 w" --flat --verbose`

use tracing_subscriber::EnvFilter;

use plum_multiverse::chess_errors::ChessErrors;
use plum_multiverse::game_state::chess_rules::SMALL_PUZZLE_FEN;
use plum_multiverse::game_state::chess_types::Position;
use plum_multiverse::utils::algebraic::algebraic_to_square;
use plum_multiverse::utils::branch_walk::{random_branch_walk, BranchWalkConfig};
use plum_multiverse::utils::render_game_state::{render_position, RenderOptions};

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|a| a == flag)
}

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Play both sides' first plies on the central timeline, then let Light
/// branch from turn 1 and walk the dark king from d4 to c4 on the new board.
fn scripted_branch(position: &mut Position) -> Result<(), ChessErrors> {
    for _ in 0..2 {
        let mut next = position.timeline(0)?.last_board().clone();
        next.pass_turn();
        position.extend_timeline(0, next)?;
    }

    let new_board = position.branch_timeline(0, 1)?;
    new_board.move_piece(algebraic_to_square("d4")?, algebraic_to_square("c4")?)?;
    Ok(())
}

fn main() -> Result<(), String> {
    let verbose = has_flag("--verbose") || has_flag("-v");
    init_tracing(verbose);

    let options = RenderOptions {
        indent_timelines: !has_flag("--flat"),
    };
    let fen = arg_value("--fen").unwrap_or_else(|| SMALL_PUZZLE_FEN.to_owned());
    let mut position = Position::from_fens(&[], &[fen.as_str()]).map_err(|e| e.to_string())?;

    match arg_value("--random") {
        Some(steps) => {
            let config = BranchWalkConfig {
                steps: steps.parse().map_err(|_| format!("invalid step count: {steps}"))?,
                seed: arg_value("--seed")
                    .map(|s| s.parse().map_err(|_| format!("invalid seed: {s}")))
                    .transpose()?
                    .unwrap_or(0),
                ..BranchWalkConfig::default()
            };
            let stats = random_branch_walk(&mut position, &config).map_err(|e| e.to_string())?;
            tracing::info!(report = %stats.report(), "random walk complete");
            println!("{}", stats.report());
        }
        None => scripted_branch(&mut position).map_err(|e| e.to_string())?,
    }

    print!("{}", render_position(&position, options));
    Ok(())
}
