use clap::Parser;
use fallblock_solver::solver::{solve_bfs, SearchLimits, SearchOutcome};
use fallblock_solver::utils::{format_transcript, load_level};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Give up once more than this many distinct states have been discovered
    #[clap(long)]
    max_states: Option<usize>,

    /// Path to the level file
    level_file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let level = match load_level(&args.level_file) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Failed to read level from {}: {}", args.level_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let limits = SearchLimits {
        max_states: args.max_states,
    };
    let outcome = solve_bfs(&level, limits);
    if let Some(solution) = outcome.solution() {
        for (i, mv) in solution.moves.iter().enumerate() {
            log::debug!("Move {}: {}", i + 1, mv);
        }
    }
    print!("{}", format_transcript(&outcome));
    match outcome {
        SearchOutcome::LimitReached { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
