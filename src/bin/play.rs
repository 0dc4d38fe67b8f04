use clap::Parser;
use fallblock_solver::engine::{Direction, Grid, Session};
use fallblock_solver::utils::load_level;
use std::io::{self, Write}; // For input/output
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Level file to play; a random level is generated when omitted
    level_file: Option<PathBuf>,

    /// Seed for the random level
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Interior width of the random level
    #[clap(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=30))]
    width: u8,

    /// Interior height of the random level
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=30))]
    height: u8,
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s {
        "l" | "left" => Some(Direction::Left),
        "r" | "right" => Some(Direction::Right),
        _ => None,
    }
}

fn print_groups(grid: &Grid) {
    for group in 1..=grid.group_count() {
        let cells = grid.group_cells(group);
        if let Some(&(r, c)) = cells.first() {
            println!(
                "  group {:<3} color {}, {} cell(s), top-left at row {} col {}",
                group,
                grid.cell(r, c).to_char(),
                cells.len(),
                r,
                c
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let grid = match &args.level_file {
        Some(path) => match load_level(path) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Failed to read level from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Grid::new_random_with_seed(args.width.into(), args.height.into(), args.seed),
    };

    let mut session = Session::new_with_grid(grid);
    println!("Welcome! Bring every color together.");

    loop {
        println!("---------------------");
        println!("Moves: {}", session.moves());
        println!("{}", session.grid().to_string_with_groups());
        print_groups(session.grid());

        if session.is_solved() {
            println!();
            println!("---------------------");
            println!("SOLVED in {} moves!", session.moves());
            println!("---------------------");
            break;
        }

        print!("Enter your move (group l|r), or 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break, // end of input
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "u" {
            if session.undo_last_move() {
                println!("Move undone.");
            } else {
                println!("Cannot undo further (already at the initial state).");
            }
            continue;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'group l|r', 'u', or 'q'.");
            continue;
        }
        match (parts[0].parse::<u8>(), parse_direction(parts[1])) {
            (Ok(group), Some(direction)) => {
                if session.process_move(group, direction) {
                    println!("Moved group {} {}.", group, direction);
                } else {
                    println!(
                        "Invalid move: group {} cannot move {} (groups are 1 to {}).",
                        group,
                        direction,
                        session.grid().group_count()
                    );
                }
            }
            _ => println!("Invalid input: enter a group number and 'l' or 'r' (e.g. '3 l')."),
        }
    }
    ExitCode::SUCCESS
}
