//! Grid module - the N x N tile matrix
//!
//! Uses a flat row-major vector; the side length is fixed at construction.
//! Coordinates are `(row, col)`, row 0 at the top, col 0 at the left.
//!
//! A move treats the grid as N independent lines. [`Grid::read_line`] and
//! [`Grid::write_line`] hide the orientation: for every direction the line is
//! presented in travel order, so index 0 is the edge tiles slide toward.

use arrayvec::ArrayVec;

use crate::error::{is_tile_value, GridError};
use crate::merge::can_merge;
use crate::types::{Direction, Tile, MAX_GRID_SIZE};

/// One row or column, in travel order.
pub type Line = ArrayVec<Tile, MAX_GRID_SIZE>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Tile>,
}

impl Grid {
    /// Create an all-empty grid.
    ///
    /// Callers are expected to pass a validated size (see `EngineConfig::validate`).
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a grid from nested rows, checking shape and tile values.
    pub fn from_rows<R: AsRef<[Tile]>>(size: usize, rows: &[R]) -> Result<Self, GridError> {
        if rows.len() != size {
            return Err(GridError::WrongSize {
                expected: size,
                actual: rows.len(),
            });
        }

        let mut grid = Self::new(size);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(GridError::RaggedRow {
                    row,
                    expected: size,
                    actual: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if value != 0 && !is_tile_value(value) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
                grid.cells[row * size + col] = value;
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    /// Get cell at `(row, col)`; None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Copy out as nested rows.
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    pub fn has_empty(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Number of occupied cells.
    pub fn count_tiles(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    pub fn contains(&self, value: Tile) -> bool {
        self.cells.contains(&value)
    }

    /// Largest tile, or 0 for an empty grid.
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// True if some tile equals its right or lower neighbour and the pair can merge.
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let v = self.cells[row * n + col];
                if !can_merge(v) {
                    continue;
                }
                if col + 1 < n && self.cells[row * n + col + 1] == v {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// No empty cell and no mergeable neighbours: no move can change the grid.
    pub fn is_stuck(&self) -> bool {
        !self.has_empty() && !self.has_adjacent_pair()
    }

    /// Grid offset of the `pos`-th cell of line `index` in travel order.
    #[inline(always)]
    fn line_offset(&self, index: usize, pos: usize, direction: Direction) -> usize {
        let n = self.size;
        let along = if direction.is_reversed() { n - 1 - pos } else { pos };
        if direction.is_horizontal() {
            index * n + along
        } else {
            along * n + index
        }
    }

    /// Read line `index` (a row for left/right, a column for up/down) in travel order.
    pub fn read_line(&self, index: usize, direction: Direction) -> Line {
        (0..self.size)
            .map(|pos| self.cells[self.line_offset(index, pos, direction)])
            .collect()
    }

    /// Write a travel-order line back, restoring grid orientation.
    pub fn write_line(&mut self, index: usize, direction: Direction, line: &[Tile]) {
        debug_assert_eq!(line.len(), self.size);
        for (pos, &value) in line.iter().enumerate().take(self.size) {
            let offset = self.line_offset(index, pos, direction);
            self.cells[offset] = value;
        }
    }
}
