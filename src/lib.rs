//! # Falling-Block Solver Library
//!
//! This library provides the puzzle model for a falling-block color-merge
//! puzzle and a Breadth First Search (BFS) solver that finds a shortest
//! sequence of moves bringing every color together.
//!
//! A level is a grid of walls, open cells and colored blocks. Blocks fall
//! under gravity, and touching blocks of the same color fuse into rigid groups.
//! A move slides one group left or right, pushing whatever is in the way.
//!
//! It is used by three binaries:
//! - `solve`: solves one level file and prints every step of the solution.
//! - `play`: lets a human play a level (or a random one) on the command line.
//! - `check_solutions`: replays a directory of levels against golden transcripts.
//!
//! ## Modules
//! - `engine`: the grid model (`Grid`, `Cell`, `Move`), move and gravity
//!   simulation, successor generation, rendering, and the interactive `Session`.
//! - `connectivity`: group merging, id compaction and the solved predicate.
//! - `solver`: provides the `solve_bfs` function.
//! - `utils`: level parsing and loading (`LoadError`) and transcript formatting.

pub mod connectivity;
pub mod engine;
pub mod solver;
pub mod utils;
