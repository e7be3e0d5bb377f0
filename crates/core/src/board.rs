//! Board module - manages the game grid
//!
//! The board is a fixed `width × height` grid of cell values stored row-major in
//! one flat buffer (row 0 is the top). Dimensions never change after
//! construction.
//!
//! Collision treats rows above the top as open space, so pieces may spawn or
//! rotate partially above the visible grid; columns outside the sides and rows
//! at or below `height` always collide.

use crate::pieces::Shape;
use crate::types::{Cell, EMPTY};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    /// Build a board from rows (top row first).
    ///
    /// Returns `None` for an empty grid or rows of unequal length.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let height = u8::try_from(rows.len()).ok()?;
        let width = u8::try_from(rows.first()?.as_ref().len()).ok()?;
        if width == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width as usize {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and filled
    pub fn is_filled(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(cell) if cell != EMPTY)
    }

    /// Would `shape` placed with its top-left corner at `(x, y)` overlap a wall,
    /// the floor, or a filled cell?
    pub fn collides(&self, shape: &Shape, x: i16, y: i16) -> bool {
        shape.occupied().iter().any(|&(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= self.width as i16 || by >= self.height as i16 {
                return true;
            }
            by >= 0 && self.is_filled(bx, by)
        })
    }

    /// Write every occupied cell of `shape` into the board.
    ///
    /// Nothing is written unless all occupied cells land inside the grid;
    /// returns whether the merge happened.
    pub fn merge(&mut self, shape: &Shape, x: i16, y: i16) -> bool {
        let cells = shape.occupied();
        if cells
            .iter()
            .any(|&(dx, dy)| self.index(x + dx, y + dy).is_none())
        {
            return false;
        }

        for &(dx, dy) in &cells {
            let (cx, cy) = (dx as usize, dy as usize);
            self.set(x + dx, y + dy, shape.get(cx, cy));
        }
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Cells of row `y`, if it exists
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Remove row `y`, shift every row above it down by one, and empty the top row
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let width = self.width as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Remove every complete row and return how many were removed.
    ///
    /// Scans bottom to top. After a row is removed the same index is examined
    /// again, since the row that slid into it may be complete as well.
    pub fn sweep_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height as usize;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Row-major view of the whole grid
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}
