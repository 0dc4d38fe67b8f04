use clap::Parser;
use fallblock_solver::solver::{solve_bfs, SearchLimits};
use fallblock_solver::utils::{format_transcript, load_level};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Solves every `*.txt` level in a directory and compares the transcript with
/// the `*.out` file next to it.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Give up on a level once more than this many distinct states have been discovered
    #[clap(long)]
    max_states: Option<usize>,

    /// Directory containing the levels and their golden transcripts
    levels_dir: PathBuf,
}

/// Returns whether the transcript matches; describes the first difference on stderr.
fn check_level(level_path: &Path, golden_path: &Path, limits: SearchLimits) -> Result<bool, String> {
    let level = load_level(level_path).map_err(|e| e.to_string())?;
    let expected = fs::read_to_string(golden_path)
        .map_err(|e| format!("failed to read {}: {}", golden_path.display(), e))?;

    let actual = format_transcript(&solve_bfs(&level, limits));
    if actual == expected {
        return Ok(true);
    }

    let first_difference = actual
        .lines()
        .zip(expected.lines())
        .enumerate()
        .find(|(_, (a, e))| a != e);
    match first_difference {
        Some((line, (a, e))) => eprintln!(
            "  first difference at line {}:\n    expected: {:?}\n    actual:   {:?}",
            line + 1,
            e,
            a
        ),
        None => eprintln!(
            "  transcripts differ in length ({} lines expected, {} produced)",
            expected.lines().count(),
            actual.lines().count()
        ),
    }
    Ok(false)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let limits = SearchLimits {
        max_states: args.max_states,
    };

    let entries = match fs::read_dir(&args.levels_dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to read directory {}: {}", args.levels_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let mut levels: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    levels.sort();

    let mut checked = 0;
    let mut failures = 0;
    for level_path in &levels {
        let golden_path = level_path.with_extension("out");
        if !golden_path.exists() {
            println!("SKIP     {} (no golden transcript)", level_path.display());
            continue;
        }

        checked += 1;
        match check_level(level_path, &golden_path, limits) {
            Ok(true) => println!("OK       {}", level_path.display()),
            Ok(false) => {
                failures += 1;
                println!("MISMATCH {}", level_path.display());
            }
            Err(e) => {
                failures += 1;
                println!("ERROR    {}: {}", level_path.display(), e);
            }
        }
    }

    println!("\n{} levels checked, {} failed", checked, failures);
    if checked == 0 {
        eprintln!("No levels with golden transcripts found in {}", args.levels_dir.display());
        return ExitCode::FAILURE;
    }
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
