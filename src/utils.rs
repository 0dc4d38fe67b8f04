use crate::engine::{Cell, Grid, MAX_GROUPS};
use crate::solver::SearchOutcome;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a level could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open level file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read level: {0}")]
    Read(#[from] io::Error),

    #[error("level is empty")]
    Empty,

    #[error("row {row} has {found} characters (expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    InvalidChar { ch: char, row: usize, col: usize },

    #[error("level has {0} blocks, at most {max} are supported", max = MAX_GROUPS)]
    TooManyBlocks(usize),
}

/// Parses the interior rows of a level into a `Grid`.
///
/// All rows must have the same, non-zero length. The wall border is added by
/// `Grid::from_interior`, so the rows only describe the inside of the level.
///
/// Valid characters are:
/// - `'#'`: wall
/// - `' '`: open cell
/// - `'1'`..=`'9'`: block of that color
/// - `'0'`: neutral (black) block
///
/// # Examples
/// ```
/// use fallblock_solver::engine::Cell;
/// use fallblock_solver::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["1 #", "22 "]).unwrap();
/// assert_eq!(grid.width(), 5);
/// assert_eq!(grid.height(), 4);
/// assert_eq!(grid.cell(1, 1), Cell::Movable { color: 1, group: 1 });
/// assert_eq!(grid.cell(1, 3), Cell::Wall);
/// assert_eq!(grid.group_count(), 2);
///
/// assert!(grid_from_str_array(&["1x"]).is_err());
/// assert!(grid_from_str_array(&["11", "1"]).is_err());
/// ```
pub fn grid_from_str_array(rows: &[&str]) -> Result<Grid, LoadError> {
    let width = rows.first().map_or(0, |row| row.chars().count());
    if width == 0 {
        return Err(LoadError::Empty);
    }

    let mut blocks = 0;
    let mut interior = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(LoadError::Ragged {
                row: r,
                expected: width,
                found,
            });
        }

        let mut cells = Vec::with_capacity(width);
        for (c, ch) in row.chars().enumerate() {
            let cell = match ch {
                '#' => Cell::Wall,
                ' ' => Cell::Open,
                '0'..='9' => {
                    blocks += 1;
                    Cell::block(ch as u8 - b'0')
                }
                _ => return Err(LoadError::InvalidChar { ch, row: r, col: c }),
            };
            cells.push(cell);
        }
        interior.push(cells);
    }

    if blocks > MAX_GROUPS {
        return Err(LoadError::TooManyBlocks(blocks));
    }
    Ok(Grid::from_interior(&interior))
}

/// Reads a level from `reader`.
///
/// The level ends at the first blank line or at the end of the input. A
/// trailing `'\r'` on each line is ignored.
pub fn read_level<R: BufRead>(reader: R) -> Result<Grid, LoadError> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        if line.is_empty() {
            break;
        }
        rows.push(line);
    }

    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    grid_from_str_array(&rows)
}

/// Opens and reads the level file at `path`.
pub fn load_level(path: &Path) -> Result<Grid, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_level(BufReader::new(file))
}

/// Formats a search outcome as the solver's stdout transcript.
///
/// A solution prints a header followed by every state, initial to solved,
/// each as `Step i:` and the bordered grid rendering. An exhausted search and
/// a search cut short by `SearchLimits` print different single lines.
pub fn format_transcript(outcome: &SearchOutcome) -> String {
    let solution = match outcome {
        SearchOutcome::Solved(solution) => solution,
        SearchOutcome::Unsolvable { .. } => return "No solution found!\n".to_string(),
        SearchOutcome::LimitReached { states_visited } => {
            return format!(
                "Search limit reached after {} states; no solution found yet.\n",
                states_visited
            )
        }
    };

    let mut output = format!("Found a solution in {} steps.\n", solution.steps());
    for (i, state) in solution.states.iter().enumerate() {
        output.push_str(&format!("\nStep {}:\n{}", i, state));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve_bfs, SearchLimits};

    #[test]
    fn test_grid_from_str_array_valid() {
        let grid = grid_from_str_array(&["1 #", "0 2"]).unwrap();
        assert_eq!(grid.cell(1, 1), Cell::Movable { color: 1, group: 1 });
        assert_eq!(grid.cell(1, 2), Cell::Open);
        assert_eq!(grid.cell(1, 3), Cell::Wall);
        assert_eq!(grid.cell(2, 1), Cell::Movable { color: 0, group: 2 });
        assert_eq!(grid.cell(2, 3), Cell::Movable { color: 2, group: 3 });
    }

    #[test]
    fn test_grid_from_str_array_round_trip() {
        for rows in [
            vec!["1"],
            vec!["12 21"],
            vec!["# 1 #", "  2  ", "33#09"],
            vec!["   ", " 4 ", "444"],
        ] {
            let grid = grid_from_str_array(&rows).unwrap();
            assert_eq!(grid.interior_lines(), rows);
        }
    }

    #[test]
    fn test_grid_from_str_array_empty() {
        assert!(matches!(grid_from_str_array(&[]), Err(LoadError::Empty)));
        assert!(matches!(grid_from_str_array(&[""]), Err(LoadError::Empty)));
    }

    #[test]
    fn test_grid_from_str_array_ragged() {
        let result = grid_from_str_array(&["12", "1", "12"]);
        assert!(matches!(
            result,
            Err(LoadError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_grid_from_str_array_invalid_char() {
        let result = grid_from_str_array(&["1 X"]);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidChar {
                ch: 'X',
                row: 0,
                col: 2
            }
        ));
        assert!(err.to_string().contains("unrecognized character 'X'"));
    }

    #[test]
    fn test_grid_from_str_array_too_many_blocks() {
        let row = "1".repeat(MAX_GROUPS + 1);
        let result = grid_from_str_array(&[row.as_str()]);
        let err = result.unwrap_err();
        assert!(matches!(err, LoadError::TooManyBlocks(256)));
        assert_eq!(
            err.to_string(),
            "level has 256 blocks, at most 255 are supported"
        );
    }

    #[test]
    fn test_read_level_stops_at_blank_line() {
        let input = "1 1\r\n#  \r\n\r\nthis is not part of the level\n";
        let grid = read_level(input.as_bytes()).unwrap();
        assert_eq!(grid.interior_lines(), vec!["1 1".to_string(), "#  ".to_string()]);
    }

    #[test]
    fn test_read_level_empty_input() {
        assert!(matches!(read_level("".as_bytes()), Err(LoadError::Empty)));
        assert!(matches!(read_level("\n1\n".as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn test_load_level_missing_file() {
        let result = load_level(Path::new("/nonexistent/level.txt"));
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }

    #[test]
    fn test_format_transcript_solved() {
        let grid = grid_from_str_array(&["1"]).unwrap();
        let transcript = format_transcript(&solve_bfs(&grid, SearchLimits::default()));
        let expected = "\
Found a solution in 0 steps.

Step 0:
+-----+
|# # #|
| +-+ |
|#|1|#|
| +-+ |
|# # #|
+-----+
";
        assert_eq!(transcript, expected);
    }

    #[test]
    fn test_format_transcript_unsolvable() {
        let grid = grid_from_str_array(&["1#1"]).unwrap();
        let transcript = format_transcript(&solve_bfs(&grid, SearchLimits::default()));
        assert_eq!(transcript, "No solution found!\n");
    }

    #[test]
    fn test_format_transcript_limit_reached() {
        let grid = grid_from_str_array(&["2   ", "1  1"]).unwrap();
        let limits = SearchLimits {
            max_states: Some(1),
        };
        let transcript = format_transcript(&solve_bfs(&grid, limits));
        assert_eq!(
            transcript,
            "Search limit reached after 2 states; no solution found yet.\n"
        );
        assert_ne!(transcript, "No solution found!\n");
    }
}
