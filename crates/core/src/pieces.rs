//! Pieces module - shapes, the canonical shape table, and quarter-turn rotation
//!
//! A shape is an N×N grid (N in 2..=4) of cell values. Rotation always works on
//! the full grid, empty cells included, so the bounding box stays square and a
//! clockwise turn followed by a counter-clockwise turn restores the original.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Cell, PieceKind, RotationDirection, EMPTY, MAX_SHAPE_SIZE, PIECE_KIND_COUNT};

/// Offset of an occupied cell relative to the shape's top-left corner
pub type CellOffset = (i16, i16);

/// One rotation state of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows.
    ///
    /// Returns `None` unless the rows form a square of side 2..=4 with at least
    /// one occupied cell and a single non-zero value throughout.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        if !(2..=MAX_SHAPE_SIZE).contains(&size) {
            return None;
        }

        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut tag = EMPTY;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return None;
            }
            for (x, &value) in row.iter().enumerate() {
                if value == EMPTY {
                    continue;
                }
                if tag != EMPTY && value != tag {
                    return None;
                }
                tag = value;
                cells[y][x] = value;
            }
        }

        if tag == EMPTY {
            return None;
        }
        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length of the square grid
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell value at `(x, y)` inside the grid; empty outside it
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// The non-zero value shared by every occupied cell
    pub fn tag(&self) -> Cell {
        self.occupied()
            .first()
            .map(|&(x, y)| self.cells[y as usize][x as usize])
            .unwrap_or(EMPTY)
    }

    /// Offsets of occupied cells, row by row
    pub fn occupied(&self) -> ArrayVec<CellOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> {
        let mut out = ArrayVec::new();
        for y in 0..self.size() {
            for x in 0..self.size() {
                if self.cells[y][x] != EMPTY {
                    out.push((x as i16, y as i16));
                }
            }
        }
        out
    }

    /// Rows of the grid, trimmed to the shape's size
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size()].iter().map(|row| &row[..self.size()])
    }

    pub fn rotated(&self, direction: RotationDirection) -> Self {
        rotate(self, direction)
    }
}

/// Rotate a shape by a quarter turn.
///
/// Transpose, then reverse each row (clockwise) or reverse the row order
/// (counter-clockwise).
pub fn rotate(shape: &Shape, direction: RotationDirection) -> Shape {
    let n = shape.size();
    let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for y in 0..n {
        for x in 0..n {
            cells[y][x] = match direction {
                RotationDirection::Clockwise => shape.cells[n - 1 - x][y],
                RotationDirection::CounterClockwise => shape.cells[x][n - 1 - y],
            };
        }
    }
    Shape {
        size: shape.size,
        cells,
    }
}

const fn grid<const N: usize>(rows: [[Cell; N]; N]) -> Shape {
    let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut y = 0;
    while y < N {
        let mut x = 0;
        while x < N {
            cells[y][x] = rows[y][x];
            x += 1;
        }
        y += 1;
    }
    Shape {
        size: N as u8,
        cells,
    }
}

const T_SHAPE: Shape = grid([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const O_SHAPE: Shape = grid([[2, 2], [2, 2]]);
const L_SHAPE: Shape = grid([[0, 0, 3], [3, 3, 3], [0, 0, 0]]);
const J_SHAPE: Shape = grid([[4, 0, 0], [4, 4, 4], [0, 0, 0]]);
const I_SHAPE: Shape = grid([[0, 0, 0, 0], [5, 5, 5, 5], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: Shape = grid([[0, 6, 6], [6, 6, 0], [0, 0, 0]]);
const Z_SHAPE: Shape = grid([[7, 7, 0], [0, 7, 7], [0, 0, 0]]);

/// Canonical spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => T_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::I => I_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn shapes for all seven kinds.
///
/// Starts from the canonical table; configuration may replace entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTable {
    shapes: [Shape; PIECE_KIND_COUNT],
}

impl ShapeTable {
    pub fn get(&self, kind: PieceKind) -> Shape {
        self.shapes[(kind.cell() - 1) as usize]
    }

    /// Replace the spawn shape of one kind
    pub fn set(&mut self, kind: PieceKind, shape: Shape) {
        self.shapes[(kind.cell() - 1) as usize] = shape;
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self {
            shapes: PieceKind::ALL.map(get_shape),
        }
    }
}
