//! Matching module - connected-group discovery
//!
//! Groups are maximal sets of occupied cells that share a color and are
//! connected through up/down/left/right neighbors. Traversal is iterative with
//! an explicit stack, so board size never turns into call depth. Only the set
//! of visited cells matters, not the order they are reached in.

use crate::grid::Grid;
use crate::types::CellPos;

/// Visited marks sized to a grid, reused across traversals.
#[derive(Debug, Clone, Default)]
pub struct FloodScratch {
    visited: Vec<bool>,
    stack: Vec<CellPos>,
}

impl FloodScratch {
    pub fn new(len: usize) -> Self {
        Self {
            visited: vec![false; len],
            // Every cell is pushed at most once per traversal.
            stack: Vec::with_capacity(len),
        }
    }

    /// Forget all visited marks, resizing for `len` cells if needed
    pub fn reset(&mut self, len: usize) {
        self.visited.clear();
        self.visited.resize(len, false);
        self.stack.clear();
        self.stack.reserve(len);
    }

    #[cfg(test)]
    fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}

/// Collect the group containing `seed` into `out`.
///
/// Leaves `out` empty when the seed is out of bounds, empty or already visited.
/// Cells already marked in `scratch` are never revisited.
pub fn collect_group(grid: &Grid, seed: CellPos, scratch: &mut FloodScratch, out: &mut Vec<CellPos>) {
    out.clear();
    flood(grid, seed, scratch, None, |pos| out.push(pos));
}

/// Size of the group containing `seed`, counting at most `limit` cells.
///
/// Stops early once `limit` is reached; the remaining cells of the group stay
/// unvisited in that case.
pub fn group_size(grid: &Grid, seed: CellPos, scratch: &mut FloodScratch, limit: Option<usize>) -> usize {
    let mut count = 0usize;
    flood(grid, seed, scratch, limit, |_| count += 1);
    count
}

/// True if any group on the grid has at least `min_size` cells.
///
/// Scans column by column with one shared visited set, so every cell is
/// touched at most once across the whole scan.
pub fn has_group_of(grid: &Grid, min_size: usize, scratch: &mut FloodScratch) -> bool {
    if min_size == 0 {
        return true;
    }
    scratch.reset(grid.len());

    for col in 0..grid.columns() {
        for row in 0..grid.rows() {
            let pos = CellPos::new(row, col);
            if !grid.is_occupied(row, col) || scratch.visited[grid.flat(pos)] {
                continue;
            }
            if group_size(grid, pos, scratch, Some(min_size)) >= min_size {
                return true;
            }
        }
    }

    false
}

fn flood(
    grid: &Grid,
    seed: CellPos,
    scratch: &mut FloodScratch,
    limit: Option<usize>,
    mut visit: impl FnMut(CellPos),
) {
    let Some(color) = grid.color_at(seed) else {
        return;
    };
    if scratch.visited.len() != grid.len() {
        scratch.reset(grid.len());
    }
    let seed_idx = grid.flat(seed);
    if scratch.visited[seed_idx] {
        return;
    }

    scratch.stack.clear();
    scratch.visited[seed_idx] = true;
    scratch.stack.push(seed);
    let mut seen = 0usize;

    while let Some(pos) = scratch.stack.pop() {
        visit(pos);
        seen += 1;
        if limit.is_some_and(|l| seen >= l) {
            break;
        }

        for next in grid.neighbors(pos) {
            let idx = grid.flat(next);
            if !scratch.visited[idx] && grid.color_at(next) == Some(color) {
                scratch.visited[idx] = true;
                scratch.stack.push(next);
            }
        }
    }
    scratch.stack.clear();
}
