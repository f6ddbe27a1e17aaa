use crate::grid::Grid;
use crate::types::Cell;

/// FNV-1a 64-bit over the encoded board bytes.
pub fn board_hash(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Encoded cell: 0 = empty, otherwise color id + 1.
#[inline]
pub fn encode_cell(cell: Cell) -> u8 {
    match cell {
        Some(color) => color.saturating_add(1),
        None => 0,
    }
}

/// Read-only copy of the board for renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GridSnapshot {
    pub rows: usize,
    pub columns: usize,
    /// Encoded cells, row-major, row 0 first
    pub board: Vec<u8>,
    pub board_hash: u64,
    pub occupied: usize,
}

impl GridSnapshot {
    /// Refresh from a grid, reusing the board allocation.
    pub fn fill_from(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.columns = grid.columns();
        self.board.clear();
        self.board
            .extend(grid.cells().iter().map(|&cell| encode_cell(cell)));
        self.board_hash = board_hash(self.board.iter().copied());
        self.occupied = self.board.iter().filter(|&&b| b != 0).count();
    }

    /// Decoded cell at (row, col), `None` when out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        let raw = self.board[row * self.columns + col];
        Some(raw.checked_sub(1))
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.rows * self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_reserves_zero_for_empty() {
        assert_eq!(encode_cell(None), 0);
        assert_eq!(encode_cell(Some(0)), 1);
        assert_eq!(encode_cell(Some(3)), 4);
    }

    #[test]
    fn snapshot_round_trips_cells_and_hashes_board() {
        let grid = Grid::from_rows(vec![vec![Some(0), None], vec![Some(2), Some(1)]]).unwrap();
        let mut snap = GridSnapshot::default();
        snap.fill_from(&grid);

        assert_eq!(snap.board, vec![1, 0, 3, 2]);
        assert_eq!(snap.cell(0, 1), Some(None));
        assert_eq!(snap.cell(1, 0), Some(Some(2)));
        assert_eq!(snap.cell(2, 0), None);
        assert_eq!(snap.occupied, 3);
        assert!(!snap.is_full());
        assert_eq!(snap.board_hash, board_hash([1u8, 0, 3, 2].into_iter()));
    }

    #[test]
    fn hash_changes_with_board() {
        let a = Grid::from_rows(vec![vec![Some(0), Some(1)]]).unwrap();
        let b = Grid::from_rows(vec![vec![Some(1), Some(0)]]).unwrap();
        let (mut sa, mut sb) = (GridSnapshot::default(), GridSnapshot::default());
        sa.fill_from(&a);
        sb.fill_from(&b);
        assert_ne!(sa.board_hash, sb.board_hash);
    }
}
