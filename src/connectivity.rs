//! Group maintenance and the solved predicate.
//!
//! Touching blocks of the same color always end up in one group, and group
//! ids are kept dense (`1..=G`) after every merge. Two physically identical
//! grids therefore compare equal cell by cell, which the solver's state
//! deduplication depends on.
use crate::engine::{neighbor, Cell, Direction, GroupId, Grid, MAX_COLOR};

impl Grid {
    /// Merges every pair of touching same-colored blocks that are still in different groups.
    ///
    /// The grid is scanned in row-major order, looking right and down from each
    /// colored block. On a mismatch the higher group id is folded into the lower
    /// one and the freed id is compacted away. Neutral (color 0) blocks never merge.
    ///
    /// Running this on a grid it has already been run on changes nothing.
    pub fn update_connections(&mut self) {
        for (r, c) in self.interior_positions() {
            for (r2, c2) in [(r, c + 1), (r + 1, c)] {
                let (
                    Cell::Movable { color, group },
                    Cell::Movable {
                        color: other_color,
                        group: other_group,
                    },
                ) = (self.cell(r, c), self.cell(r2, c2))
                else {
                    continue;
                };
                if color == 0 || color != other_color || group == other_group {
                    continue;
                }

                let (from, to, start) = if group > other_group {
                    (group, other_group, (r, c))
                } else {
                    (other_group, group, (r2, c2))
                };
                self.regroup(start, from, to);
                self.remove_unused_group_number(from);
            }
        }
    }

    /// Relabels the group `from` reachable from `start` as `to`.
    fn regroup(&mut self, start: (usize, usize), from: GroupId, to: GroupId) {
        let mut pending = vec![start];
        while let Some((r, c)) = pending.pop() {
            if let Cell::Movable { color, group } = self.cell(r, c) {
                if group == from {
                    self.set_cell(r, c, Cell::Movable { color, group: to });
                    pending.extend(Direction::ALL.map(|d| neighbor((r, c), d)));
                }
            }
        }
    }

    /// Closes the gap left by a merged-away group id.
    fn remove_unused_group_number(&mut self, removed: GroupId) {
        assert!(
            removed >= 1 && removed <= self.groups,
            "group {removed} is not live"
        );
        for cell in &mut self.cells {
            if let Cell::Movable { group, .. } = cell {
                debug_assert_ne!(*group, removed, "merged group still has cells");
                if *group > removed {
                    *group -= 1;
                }
            }
        }
        self.groups -= 1;
    }

    /// Whether every color forms a single connected region.
    ///
    /// This flood-fills blocks through same-color adjacency rather than trusting
    /// the group ids, and fails as soon as some color turns up in a second region.
    /// Neutral blocks are ignored; a grid with no colored blocks is solved.
    pub fn is_solved(&self) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut seen_colors = [false; MAX_COLOR as usize + 1];

        for (r, c) in self.interior_positions() {
            let Cell::Movable { color, .. } = self.cell(r, c) else {
                continue;
            };
            if color == 0 || visited[self.index(r, c)] {
                continue;
            }
            if seen_colors[color as usize] {
                // second region of one color
                return false;
            }
            seen_colors[color as usize] = true;
            self.mark_color_visited((r, c), color, &mut visited);
        }
        true
    }

    fn mark_color_visited(&self, start: (usize, usize), color: u8, visited: &mut [bool]) {
        visited[self.index(start.0, start.1)] = true;
        let mut pending = vec![start];
        while let Some(pos) = pending.pop() {
            for d in Direction::ALL {
                let (r, c) = neighbor(pos, d);
                let index = self.index(r, c);
                if !visited[index] && self.cell(r, c).color() == Some(color) {
                    visited[index] = true;
                    pending.push((r, c));
                }
            }
        }
    }
}
