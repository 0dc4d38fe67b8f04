//! Core puzzle model for the falling-block color-merge puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Cell`: a wall, an open cell, or a movable colored block tagged with its group.
//! - `Direction` and `Move`: the unit moves a group can make.
//! - `Grid`: the full puzzle state, including move simulation (grab and push),
//!   gravity, successor generation and the bordered text rendering.
//! - `Session`: an interactive play session with move counting and undo history.
//!
//! Group maintenance and the solved predicate live in `connectivity`.
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Identifier of a movable group. Live groups are always numbered `1..=G`.
pub type GroupId = u8;

/// Largest number of movable groups a grid can hold.
pub const MAX_GROUPS: usize = GroupId::MAX as usize;

/// Highest block color. Color 0 is the neutral (black) color, which never merges.
pub const MAX_COLOR: u8 = 9;

/// Number of distinct colors used by `Grid::new_random_with_seed`.
const RANDOM_COLORS: u8 = 3;

/// Contents of one grid cell.
///
/// The variant order matters: the derived ordering is part of the grid ordering
/// used to sort successors and to break ties during search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// Empty space; anything may move into it.
    #[default]
    Open,
    /// Immovable; blocks everything.
    Wall,
    /// A colored block belonging to a rigid group.
    Movable { color: u8, group: GroupId },
}

impl Cell {
    /// A movable block of the given color whose group is not assigned yet.
    ///
    /// `Grid::from_interior` assigns the real group ids.
    pub fn block(color: u8) -> Self {
        Cell::Movable { color, group: 0 }
    }

    /// Converts the cell to its level-text character.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_solver::engine::Cell;
    /// assert_eq!(Cell::Wall.to_char(), '#');
    /// assert_eq!(Cell::Open.to_char(), ' ');
    /// assert_eq!(Cell::block(7).to_char(), '7');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Open => ' ',
            Cell::Wall => '#',
            Cell::Movable { color, .. } => char::from(b'0' + color),
        }
    }

    pub fn is_movable(&self) -> bool {
        matches!(self, Cell::Movable { .. })
    }

    /// Group of a movable cell, `None` for walls and open cells.
    pub fn group(&self) -> Option<GroupId> {
        match self {
            Cell::Movable { group, .. } => Some(*group),
            _ => None,
        }
    }

    /// Color of a movable cell, `None` for walls and open cells.
    pub fn color(&self) -> Option<u8> {
        match self {
            Cell::Movable { color, .. } => Some(*color),
            _ => None,
        }
    }

    /// Whether two cells are drawn as one body: both walls, both open, or
    /// movable cells of the same group.
    pub(crate) fn same_body(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Open, Cell::Open) | (Cell::Wall, Cell::Wall) => true,
            (Cell::Movable { group: a, .. }, Cell::Movable { group: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Returns the ANSI background color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Cell::Open => "40",
            Cell::Wall => "47",
            Cell::Movable { color, .. } => match color {
                0 => "100",
                1 => "41",
                2 => "42",
                3 => "44",
                4 => "43",
                5 => "45",
                6 => "46",
                7 => "101",
                8 => "102",
                _ => "104",
            },
        }
    }
}

/// One of the four orthogonal unit directions.
///
/// Only `Left` and `Right` are ever chosen as moves; `Down` is used by gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    /// The directions a player (or the solver) may move a group in, in trial order.
    pub const HORIZONTAL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// `(row, column)` offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Up => "up",
        };
        f.write_str(name)
    }
}

/// A horizontal move of one group. The group id refers to the numbering of
/// the state the move is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub group: GroupId,
    pub direction: Direction,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} {}", self.group, self.direction)
    }
}

/// Position one step away from `(r, c)`.
///
/// Callers only step from interior cells, so the wall border keeps the result in bounds.
pub(crate) fn neighbor((r, c): (usize, usize), direction: Direction) -> (usize, usize) {
    let (dr, dc) = direction.delta();
    (r.wrapping_add_signed(dr), c.wrapping_add_signed(dc))
}

/// The full puzzle state.
///
/// The grid stores `width × height` cells in row-major order, including a
/// permanent wall border, so move and gravity code never needs bounds checks.
/// Equality and ordering are structural (dimensions, group count, then cells),
/// which is what the solver relies on to deduplicate states.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) groups: GroupId,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from its interior rows, adding the wall border.
    ///
    /// Every movable cell starts in a fresh group, numbered in row-major order;
    /// the connectivity pass then merges touching same-colored blocks.
    ///
    /// # Panics
    /// Panics if the interior is empty or not rectangular, if a color exceeds
    /// `MAX_COLOR`, or if there are more than `MAX_GROUPS` movable cells.
    /// `utils::grid_from_str_array` validates level text before calling this.
    pub fn from_interior(interior: &[Vec<Cell>]) -> Self {
        let inner_height = interior.len();
        let inner_width = interior.first().map_or(0, Vec::len);
        assert!(
            inner_width > 0 && inner_height > 0,
            "grid interior must not be empty"
        );
        assert!(
            interior.iter().all(|row| row.len() == inner_width),
            "grid interior must be rectangular"
        );

        let width = inner_width + 2;
        let height = inner_height + 2;
        let mut grid = Grid {
            width,
            height,
            groups: 0,
            cells: vec![Cell::Wall; width * height],
        };

        for (r, row) in interior.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                let cell = match cell {
                    Cell::Movable { color, .. } => {
                        assert!(color <= MAX_COLOR, "block color {color} out of range");
                        grid.groups = grid
                            .groups
                            .checked_add(1)
                            .expect("more movable blocks than group ids");
                        Cell::Movable {
                            color,
                            group: grid.groups,
                        }
                    }
                    other => other,
                };
                grid.set_cell(r + 1, c + 1, cell);
            }
        }

        grid.update_connections();
        grid
    }

    /// Creates a random level from a seed.
    ///
    /// The same seed and dimensions always produce the same grid. Interior cells
    /// are walls, open cells, or blocks of colors `1..=3`; the grid is not
    /// settled, so blocks may float until the first move applies gravity.
    ///
    /// # Arguments
    /// * `inner_width`, `inner_height`: interior dimensions, both at least 1.
    /// * `seed`: seed for the `SmallRng` used to pick cells.
    pub fn new_random_with_seed(inner_width: usize, inner_height: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut blocks = 0;
        let mut interior = Vec::with_capacity(inner_height);

        for _ in 0..inner_height {
            let mut row = Vec::with_capacity(inner_width);
            for _ in 0..inner_width {
                let cell = match rng.gen_range(0..10u8) {
                    0 | 1 => Cell::Wall,
                    2..=5 => Cell::Open,
                    _ if blocks < MAX_GROUPS => {
                        blocks += 1;
                        Cell::block(rng.gen_range(1..=RANDOM_COLORS))
                    }
                    _ => Cell::Open,
                };
                row.push(cell);
            }
            interior.push(row);
        }
        Grid::from_interior(&interior)
    }

    /// Width including the wall border.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height including the wall border.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live groups `G`; group ids are `1..=G`.
    pub fn group_count(&self) -> GroupId {
        self.groups
    }

    /// Returns the cell at row `r`, column `c` (border included).
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn cell(&self, r: usize, c: usize) -> Cell {
        self.cells[self.index(r, c)]
    }

    pub(crate) fn index(&self, r: usize, c: usize) -> usize {
        r * self.width + c
    }

    pub(crate) fn set_cell(&mut self, r: usize, c: usize, cell: Cell) {
        let index = self.index(r, c);
        self.cells[index] = cell;
    }

    /// Interior positions in row-major (top-to-bottom, left-to-right) order.
    pub(crate) fn interior_positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width, self.height);
        (1..height - 1).flat_map(move |r| (1..width - 1).map(move |c| (r, c)))
    }

    /// Positions of every cell of `group`, in row-major order.
    pub fn group_cells(&self, group: GroupId) -> Vec<(usize, usize)> {
        self.interior_positions()
            .filter(|&(r, c)| self.cell(r, c).group() == Some(group))
            .collect()
    }

    /// The interior as level text rows (no border).
    pub fn interior_lines(&self) -> Vec<String> {
        (1..self.height - 1)
            .map(|r| (1..self.width - 1).map(|c| self.cell(r, c).to_char()).collect())
            .collect()
    }

    /// Moves `group` one step in `direction`, then applies gravity and group maintenance.
    ///
    /// Blocks in the way are pushed along. If any part of the moving set would
    /// run into a wall the move fails and the grid is left untouched.
    ///
    /// # Returns
    /// `true` if the group moved.
    ///
    /// # Panics
    /// Panics if `group` is not a live group id. The solver only ever asks for
    /// ids in `1..=group_count()`.
    pub fn move_group(&mut self, group: GroupId, direction: Direction) -> bool {
        assert!(
            group >= 1 && group <= self.groups,
            "group {group} is not live (groups: {})",
            self.groups
        );
        let Some((r, c)) = self
            .interior_positions()
            .find(|&(r, c)| self.cell(r, c).group() == Some(group))
        else {
            panic!("group {group} has no cells");
        };

        if !self.try_move(r, c, direction) {
            return false;
        }
        self.apply_gravity();
        self.update_connections();
        true
    }

    /// Translates the set grabbed from `(r, c)` one step, or restores it if the move is blocked.
    fn try_move(&mut self, r: usize, c: usize, direction: Direction) -> bool {
        let mut grabbed = Vec::new();
        let moved = self.grab(r, c, direction, &mut grabbed);
        for (pos, cell) in grabbed {
            let (r2, c2) = if moved { neighbor(pos, direction) } else { pos };
            debug_assert_eq!(self.cell(r2, c2), Cell::Open);
            self.set_cell(r2, c2, cell);
        }
        moved
    }

    /// Lifts every cell that has to move together with `(r, c)` out of the grid.
    ///
    /// A grabbed cell pulls in the movable cell ahead of it in `direction` (it
    /// pushes whatever it runs into) and, in the other three directions, only
    /// cells of its own group. Lifted cells are left `Open` and appended to
    /// `grabbed`; the caller puts them back. Returns `false` as soon as a
    /// grabbed cell has a wall ahead of it.
    fn grab(
        &mut self,
        r: usize,
        c: usize,
        direction: Direction,
        grabbed: &mut Vec<((usize, usize), Cell)>,
    ) -> bool {
        assert!(
            self.cell(r, c).is_movable(),
            "cannot grab non-movable cell at ({r}, {c})"
        );
        let mut pending = vec![(r, c)];
        while let Some(pos) = pending.pop() {
            let cell = self.cell(pos.0, pos.1);
            // Already lifted through another path.
            let Cell::Movable { group, .. } = cell else {
                continue;
            };
            grabbed.push((pos, cell));
            self.set_cell(pos.0, pos.1, Cell::Open);

            for d in Direction::ALL {
                let next = neighbor(pos, d);
                match self.cell(next.0, next.1) {
                    Cell::Wall if d == direction => return false,
                    Cell::Movable { .. } if d == direction => pending.push(next),
                    Cell::Movable { group: g, .. } if g == group => pending.push(next),
                    _ => {}
                }
            }
        }
        true
    }

    /// One top-to-bottom sweep that tries to drop every movable cell by one row.
    ///
    /// A cell that drops is met again when the sweep reaches its new row, so
    /// one sweep lets everything fall until it rests on a wall or on a block
    /// that rests on a wall.
    fn apply_gravity(&mut self) {
        for (r, c) in self.interior_positions() {
            if self.cell(r, c).is_movable() {
                self.try_move(r, c, Direction::Down);
            }
        }
    }

    /// All distinct states reachable with one horizontal move.
    ///
    /// Each group is tried left, then right. The result is sorted by the grid
    /// ordering and deduplicated; when several moves lead to the same grid the
    /// smallest move is kept.
    pub fn successors(&self) -> Vec<(Move, Grid)> {
        let mut result = Vec::new();
        let mut next = self.clone();
        for group in 1..=self.groups {
            for direction in Direction::HORIZONTAL {
                if next.move_group(group, direction) {
                    result.push((Move { group, direction }, next));
                    next = self.clone();
                }
            }
        }

        result.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        result.dedup_by(|later, earlier| later.1 == earlier.1);
        debug!("{} distinct successors", result.len());
        result
    }

    /// Renders the interior with ANSI background colors and group ids, for the terminal.
    pub fn to_string_with_groups(&self) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c in 1..self.width - 1 {
            output.push_str(&format!("{:<3}", c));
        }
        output.push('\n');

        for r in 1..self.height - 1 {
            output.push_str(&format!("{:<3}", r));
            for c in 1..self.width - 1 {
                let cell = self.cell(r, c);
                let content = match cell.group() {
                    Some(group) => format!("{:<3}", group),
                    None => "   ".to_string(),
                };
                output.push_str(&format!(
                    "\x1b[1;{}m{}\x1b[m",
                    cell.to_ansi_color_code(),
                    content
                ));
            }
            if r < self.height - 2 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Grid {
    /// Bordered rendering of the whole grid, border walls included.
    ///
    /// Cells that form one body (both walls, both open, or the same group) are
    /// drawn without a separator between them; a `·` marks a 2×2 block of one body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = format!("+-{}+", "--".repeat(self.width - 1));
        writeln!(f, "{frame}")?;
        for r in 0..self.height {
            write!(f, "|")?;
            for c in 0..self.width {
                let cell = self.cell(r, c);
                write!(f, "{}", cell.to_char())?;
                if c + 1 < self.width {
                    let joined = cell.same_body(&self.cell(r, c + 1));
                    write!(f, "{}", if joined { ' ' } else { '|' })?;
                }
            }
            writeln!(f, "|")?;

            if r + 1 < self.height {
                write!(f, "|")?;
                for c in 0..self.width {
                    let cell = self.cell(r, c);
                    let below = cell.same_body(&self.cell(r + 1, c));
                    write!(f, "{}", if below { ' ' } else { '-' })?;
                    if c + 1 < self.width {
                        let corner = below
                            && cell.same_body(&self.cell(r, c + 1))
                            && cell.same_body(&self.cell(r + 1, c + 1));
                        write!(f, "{}", if corner { '·' } else { '+' })?;
                    }
                }
                writeln!(f, "|")?;
            }
        }
        writeln!(f, "{frame}")
    }
}

/// An interactive play session.
///
/// Tracks the current grid, the number of moves made, and a history of states
/// for undo.
///
/// # Examples
/// ```
/// use fallblock_solver::engine::{Direction, Session};
/// use fallblock_solver::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["1 1"]).unwrap();
/// let mut session = Session::new_with_grid(grid);
/// assert!(!session.is_solved());
///
/// assert!(session.process_move(1, Direction::Right));
/// assert!(session.is_solved());
/// assert_eq!(session.moves(), 1);
///
/// assert!(session.undo_last_move());
/// assert_eq!(session.moves(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    moves: u32,
    history: Vec<(Grid, u32)>, // (grid, moves) for undo, starting with the initial state
}

impl Session {
    pub fn new_with_grid(initial_grid: Grid) -> Self {
        Session {
            grid: initial_grid.clone(),
            moves: 0,
            history: vec![(initial_grid, 0)],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of successful moves made so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Moves `group` one step in `direction`.
    ///
    /// Unlike `Grid::move_group`, an unknown group id is treated as an invalid
    /// move, since it comes from user input.
    ///
    /// # Returns
    /// `true` if the group moved; `false` if the id is not live or the move is blocked.
    pub fn process_move(&mut self, group: GroupId, direction: Direction) -> bool {
        if group == 0 || group > self.grid.group_count() {
            return false;
        }
        if !self.grid.move_group(group, direction) {
            return false;
        }

        self.moves += 1;
        self.history.push((self.grid.clone(), self.moves));
        true
    }

    /// Reverts the last successful move. Returns `false` at the initial state.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        if let Some((previous_grid, previous_moves)) = self.history.last() {
            self.grid = previous_grid.clone();
            self.moves = *previous_moves;
        }
        true
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    fn grid(rows: &[&str]) -> Grid {
        grid_from_str_array(rows).unwrap()
    }

    #[test]
    fn test_from_interior_adds_wall_border() {
        let g = grid(&["1 ", "# "]);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 4);
        for c in 0..g.width() {
            assert_eq!(g.cell(0, c), Cell::Wall);
            assert_eq!(g.cell(g.height() - 1, c), Cell::Wall);
        }
        for r in 0..g.height() {
            assert_eq!(g.cell(r, 0), Cell::Wall);
            assert_eq!(g.cell(r, g.width() - 1), Cell::Wall);
        }
        assert_eq!(g.cell(1, 1), Cell::Movable { color: 1, group: 1 });
        assert_eq!(g.cell(1, 2), Cell::Open);
        assert_eq!(g.cell(2, 1), Cell::Wall);
    }

    #[test]
    fn test_groups_assigned_in_row_major_order() {
        let g = grid(&["12", "3 "]);
        assert_eq!(g.group_count(), 3);
        assert_eq!(g.cell(1, 1).group(), Some(1));
        assert_eq!(g.cell(1, 2).group(), Some(2));
        assert_eq!(g.cell(2, 1).group(), Some(3));
    }

    #[test]
    fn test_touching_same_color_blocks_start_merged() {
        let g = grid(&["11", " 1"]);
        assert_eq!(g.group_count(), 1);
        assert_eq!(g.group_cells(1), vec![(1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_cell_to_char() {
        assert_eq!(Cell::Open.to_char(), ' ');
        assert_eq!(Cell::Wall.to_char(), '#');
        assert_eq!(Cell::block(0).to_char(), '0');
        assert_eq!(Cell::Movable { color: 9, group: 4 }.to_char(), '9');
    }

    #[test]
    fn test_move_into_open_cell() {
        let mut g = grid(&["1  "]);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(g.cell(1, 1), Cell::Open);
        assert_eq!(g.cell(1, 2), Cell::Movable { color: 1, group: 1 });
    }

    #[test]
    fn test_move_blocked_by_wall_leaves_grid_unchanged() {
        let mut g = grid(&["1#", "  "]);
        let before = g.clone();
        assert!(!g.move_group(1, Direction::Right));
        assert_eq!(g, before);
        assert!(!g.move_group(1, Direction::Left)); // border wall
        assert_eq!(g, before);
    }

    #[test]
    fn test_move_pushes_blocks_in_the_way() {
        let mut g = grid(&["12 "]);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(g.interior_lines(), vec![" 12".to_string()]);
        assert_eq!(g.cell(1, 2), Cell::Movable { color: 1, group: 1 });
        assert_eq!(g.cell(1, 3), Cell::Movable { color: 2, group: 2 });
    }

    #[test]
    fn test_push_chain_into_wall_fails() {
        let mut g = grid(&["12#"]);
        let before = g.clone();
        assert!(!g.move_group(1, Direction::Right));
        assert_eq!(g, before);
    }

    #[test]
    fn test_moving_group_does_not_drag_other_groups_sideways() {
        let mut g = grid(&["2  ", "1  "]);
        // Group 2 is the lower block; the block on top of it is left behind and falls.
        assert!(g.move_group(2, Direction::Right));
        assert_eq!(g.interior_lines(), vec!["   ".to_string(), "21 ".to_string()]);
    }

    #[test]
    fn test_gravity_after_move() {
        let mut g = grid(&["1 ", "  "]);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(g.cell(1, 2), Cell::Open);
        assert_eq!(g.cell(2, 2), Cell::Movable { color: 1, group: 1 });
    }

    #[test]
    fn test_group_falls_as_rigid_body() {
        let mut g = grid(&["11 ", "1  ", "#  "]);
        assert_eq!(g.group_count(), 1);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(
            g.interior_lines(),
            vec!["   ".to_string(), " 11".to_string(), "#1 ".to_string()]
        );
        assert_eq!(g.group_cells(1), vec![(2, 2), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_block_lands_on_block() {
        let mut g = grid(&["1 ", " 2"]);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(g.interior_lines(), vec![" 1".to_string(), " 2".to_string()]);
        assert_eq!(g.group_count(), 2);
    }

    #[test]
    fn test_landing_on_same_color_merges() {
        let mut g = grid(&["1 ", " 1"]);
        assert!(g.move_group(1, Direction::Right));
        assert_eq!(g.group_count(), 1);
        assert!(g.is_solved());
    }

    #[test]
    fn test_successors_sorted_and_distinct() {
        let g = grid(&["1 1"]);
        let successors = g.successors();
        assert_eq!(successors.len(), 2);
        assert_eq!(
            successors[0].0,
            Move {
                group: 1,
                direction: Direction::Right
            }
        );
        assert_eq!(successors[0].1.interior_lines(), vec![" 11".to_string()]);
        assert_eq!(
            successors[1].0,
            Move {
                group: 2,
                direction: Direction::Left
            }
        );
        assert_eq!(successors[1].1.interior_lines(), vec!["11 ".to_string()]);
        assert!(successors.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn test_successors_replay_their_moves() {
        let g = Grid::new_random_with_seed(6, 5, 7);
        for (mv, next) in g.successors() {
            let mut replayed = g.clone();
            assert!(replayed.move_group(mv.group, mv.direction));
            assert_eq!(replayed, next);
            assert_ne!(next, g);
        }
    }

    #[test]
    fn test_successors_of_stuck_level_is_empty() {
        let g = grid(&["1#1"]);
        assert!(g.successors().is_empty());
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_move_dead_group_panics() {
        let mut g = grid(&["1 "]);
        g.move_group(2, Direction::Left);
    }

    #[test]
    fn test_random_grid_determinism() {
        let a = Grid::new_random_with_seed(7, 6, 123);
        let b = Grid::new_random_with_seed(7, 6, 123);
        assert_eq!(a, b);
        assert_eq!(a.width(), 9);
        assert_eq!(a.height(), 8);
        let c = Grid::new_random_with_seed(7, 6, 124);
        assert_ne!(a, c, "Grids with different seeds should differ.");
    }

    #[test]
    fn test_display_single_block() {
        let g = grid(&["1"]);
        let expected = "\
+-----+
|# # #|
| +-+ |
|#|1|#|
| +-+ |
|# # #|
+-----+
";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn test_display_joins_same_group() {
        let g = grid(&["11", "11"]);
        let rendered = g.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[3], "|#|1 1|#|");
        assert_eq!(lines[4], "| + · + |");
        assert_eq!(lines[5], "|#|1 1|#|");
    }

    #[test]
    fn test_display_separates_different_groups() {
        let g = grid(&["12"]);
        let rendered = g.to_string();
        assert_eq!(rendered.lines().nth(3), Some("|#|1|2|#|"));
    }

    #[test]
    fn test_session_move_and_undo() {
        let mut session = Session::new_with_grid(grid(&["1  1"]));
        assert!(!session.undo_last_move());
        assert!(session.process_move(1, Direction::Right));
        assert!(!session.is_solved());
        assert!(session.process_move(1, Direction::Right));
        assert!(session.is_solved());
        assert_eq!(session.moves(), 2);

        assert!(session.undo_last_move());
        assert_eq!(session.moves(), 1);
        assert_eq!(session.grid().interior_lines(), vec![" 1 1".to_string()]);

        assert!(session.undo_last_move());
        assert_eq!(session.moves(), 0);
        assert_eq!(session.grid().interior_lines(), vec!["1  1".to_string()]);
        assert!(!session.undo_last_move());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_session_rejects_invalid_moves() {
        let mut session = Session::new_with_grid(grid(&["1#"]));
        assert!(!session.process_move(0, Direction::Left));
        assert!(!session.process_move(5, Direction::Left));
        assert!(!session.process_move(1, Direction::Right));
        assert_eq!(session.moves(), 0);
    }
}
