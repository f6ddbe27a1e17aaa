//! Grid module - the logical cell matrix
//!
//! The grid is a `rows x columns` matrix where each cell is either empty or holds
//! a color id. Uses a flat vector for cache locality; the dimensions are fixed
//! once the grid is built.
//! Coordinates: (row, col) where row 0 is the bottom row and rows grow upwards.

use arrayvec::ArrayVec;

use crate::types::{Cell, CellPos, ColorId, Direction};

/// Rectangular grid of cells using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    /// Build a grid from rows listed bottom to top.
    ///
    /// Returns `None` when the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len())?;
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }

        Some(Self {
            rows: height,
            columns: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Copy the cells out as rows listed bottom to top
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(row * self.columns + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Color at a position, `None` if empty or out of bounds
    pub fn color_at(&self, pos: CellPos) -> Option<ColorId> {
        self.get(pos.row, pos.col).flatten()
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Flat index of a position already known to be in bounds
    #[inline(always)]
    pub(crate) fn flat(&self, pos: CellPos) -> usize {
        pos.row * self.columns + pos.col
    }

    /// In-bounds 4-directional neighbors of a position
    pub fn neighbors(&self, pos: CellPos) -> ArrayVec<CellPos, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.step(dir))
            .filter(|&n| self.contains(n))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Stable bottom compaction of one column.
    ///
    /// Occupied cells keep their relative order and slide down towards row 0.
    /// `on_move(to_row, from_row)` fires for every tile that changes row.
    /// Returns the first free row (everything from there up is empty).
    pub fn compact_column(&mut self, col: usize, mut on_move: impl FnMut(usize, usize)) -> usize {
        if col >= self.columns {
            return self.rows;
        }

        let mut write_row = 0;
        for read_row in 0..self.rows {
            let src = read_row * self.columns + col;
            if self.cells[src].is_none() {
                continue;
            }
            if read_row != write_row {
                let dst = write_row * self.columns + col;
                self.cells[dst] = self.cells[src].take();
                on_move(write_row, read_row);
            }
            write_row += 1;
        }
        write_row
    }

    /// True when the column has no empty cell below an occupied one
    pub fn column_is_packed(&self, col: usize) -> bool {
        let mut seen_gap = false;
        for row in 0..self.rows {
            match self.get(row, col) {
                Some(Some(_)) if seen_gap => return false,
                Some(None) => seen_gap = true,
                _ => {}
            }
        }
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
