//! Board module - manages the game grid
//!
//! The board is a `width × height` grid where each cell is either empty or
//! filled with the color of the piece that landed there. Dimensions are fixed
//! at construction (10×20 by default).
//! Uses a flat row-major vector for cache locality; it is allocated once and
//! never resized.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::piece::{Piece, Position};
use crate::shape::Shape;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Create an empty 10×20 board
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Build a board from explicit rows (row 0 at the top).
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape`, anchored at `position` and offset by `(dx, dy)`, lies
    /// entirely on empty in-bounds cells.
    ///
    /// `dx = dy = 0` checks the placement itself (rotations, spawns).
    pub fn is_valid_position(&self, shape: &Shape, position: Position, dx: i32, dy: i32) -> bool {
        shape.cells().iter().all(|&(sx, sy)| {
            let x = position.x.saturating_add(sx).saturating_add(dx);
            let y = position.y.saturating_add(sy).saturating_add(dy);
            self.is_valid(x, y)
        })
    }

    /// Write every occupied cell of `piece` into the grid with the piece color.
    ///
    /// Cells that fall outside the board are skipped. Returns how many cells
    /// were written.
    pub fn merge(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(piece.color)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        match self.row(y) {
            Some(row) => !row.is_empty() && row.iter().all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.height).filter(|&y| self.is_row_full(y))
    }

    /// Remove every full row and refill the top with empty rows.
    ///
    /// Kept rows keep their relative order and settle at the bottom.
    /// Uses a two-pointer pass with no allocation. Returns the number of rows
    /// removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Fill an entire row with one color. Returns false if out of bounds.
    pub fn fill_row(&mut self, y: usize, color: Color) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].fill(Some(color));
        true
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Clear the entire board, keeping its dimensions
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
