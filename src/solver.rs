use crate::engine::{Grid, Move};
use fnv::{FnvBuildHasher, FnvHashMap};
use log::{debug, info};
use std::hash::BuildHasher;

/// How often (in expanded states) search progress is logged.
const PROGRESS_INTERVAL: usize = 100_000;

/// Optional bounds on a search. The default is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Give up as soon as more than this many distinct states have been discovered.
    pub max_states: Option<usize>,
}

/// A solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every state from the initial one to the solved one, inclusive.
    pub states: Vec<Grid>,
    /// `moves[i]` turns `states[i]` into `states[i + 1]`.
    pub moves: Vec<Move>,
    /// Number of distinct states discovered before the solution was found.
    pub states_visited: usize,
}

impl Solution {
    /// Number of moves in the solution.
    pub fn steps(&self) -> usize {
        self.moves.len()
    }
}

/// Result of a search. Only `Solved` carries a path; the other two are normal
/// outcomes, not errors.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    /// Every reachable state was explored and none is solved.
    Unsolvable { states_visited: usize },
    /// `SearchLimits::max_states` was hit first.
    LimitReached { states_visited: usize },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

struct Node {
    grid: Grid,
    /// Index of the predecessor and the move that led here; `None` for the root.
    parent: Option<(usize, Move)>,
}

/// Tables for one breadth-first search.
///
/// `nodes` holds every discovered state in discovery order and doubles as the
/// FIFO frontier. `index` maps a content hash to the nodes with that hash.
struct Search {
    nodes: Vec<Node>,
    index: FnvHashMap<u64, Vec<usize>>,
    hasher: FnvBuildHasher,
}

impl Search {
    fn new(initial: Grid) -> Self {
        let mut search = Search {
            nodes: Vec::new(),
            index: FnvHashMap::default(),
            hasher: FnvBuildHasher::default(),
        };
        search.insert(initial, None);
        search
    }

    /// Records `grid` unless an equal state was already discovered.
    fn insert(&mut self, grid: Grid, parent: Option<(usize, Move)>) -> bool {
        let hash = self.hasher.hash_one(&grid);
        let bucket = self.index.entry(hash).or_default();
        if bucket.iter().any(|&i| self.nodes[i].grid == grid) {
            return false;
        }
        bucket.push(self.nodes.len());
        self.nodes.push(Node { grid, parent });
        true
    }

    /// Walks predecessor links back from `index`, then appends the solved state.
    fn reconstruct(&self, mut index: usize, solved: Grid, last_move: Move) -> Solution {
        let mut states = vec![solved];
        let mut moves = vec![last_move];
        loop {
            let node = &self.nodes[index];
            states.push(node.grid.clone());
            match node.parent {
                Some((parent, mv)) => {
                    moves.push(mv);
                    index = parent;
                }
                None => break,
            }
        }
        states.reverse();
        moves.reverse();
        Solution {
            states,
            moves,
            states_visited: self.nodes.len(),
        }
    }
}

/// Finds a shortest sequence of horizontal moves that solves `initial`.
///
/// States are explored in breadth-first order and successors in the order
/// `Grid::successors` returns them; the first solved successor wins. All
/// discovered states are kept until the search returns.
pub fn solve_bfs(initial: &Grid, limits: SearchLimits) -> SearchOutcome {
    if initial.is_solved() {
        info!("Initial state is already solved");
        return SearchOutcome::Solved(Solution {
            states: vec![initial.clone()],
            moves: Vec::new(),
            states_visited: 1,
        });
    }

    let mut search = Search::new(initial.clone());
    let mut next = 0;
    while next < search.nodes.len() {
        if next > 0 && next % PROGRESS_INTERVAL == 0 {
            debug!(
                "Expanded {} states, {} discovered",
                next,
                search.nodes.len()
            );
        }

        let successors = search.nodes[next].grid.successors();
        for (mv, grid) in successors {
            if grid.is_solved() {
                info!("Solution found (expanded {} states)", search.nodes.len());
                return SearchOutcome::Solved(search.reconstruct(next, grid, mv));
            }
            if !search.insert(grid, Some((next, mv))) {
                continue;
            }
            if let Some(max_states) = limits.max_states {
                if search.nodes.len() > max_states {
                    info!("Search limit reached ({} states)", max_states);
                    return SearchOutcome::LimitReached {
                        states_visited: search.nodes.len(),
                    };
                }
            }
        }
        next += 1;
    }

    info!("No solution found (expanded {} states)", search.nodes.len());
    SearchOutcome::Unsolvable {
        states_visited: search.nodes.len(),
    }
}
