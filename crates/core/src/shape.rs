//! Piece matrices and quarter-turn rotation
//!
//! A [`Shape`] is an owned, exclusively held buffer. Rotation rewrites it in
//! place, so nothing should keep references into a shape across a rotate.

use crate::error::GridError;
use crate::types::{cell_value, Cell, PieceKind, RotateDir};

/// One tetromino in one rotation state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Shape {
    /// Build a shape from a 0/1 mask; filled cells carry `kind`.
    ///
    /// Rows shorter than the first one are padded with empty cells.
    pub fn from_mask(kind: PieceKind, mask: &[&[u8]]) -> Self {
        let height = mask.len();
        let width = mask.first().map_or(0, |row| row.len());
        let mut cells = vec![None; width * height];
        for (y, row) in mask.iter().enumerate() {
            for (x, &bit) in row.iter().take(width).enumerate() {
                if bit != 0 {
                    cells[y * width + x] = Some(kind);
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a shape from numeric rows (0 = empty, 1..=7 = colour id).
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                cells.push(match value {
                    0 => None,
                    v => Some(
                        PieceKind::from_color_id(v)
                            .ok_or(GridError::InvalidCellValue { value: v, x, y })?,
                    ),
                });
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Filled cells as `(dx, dy, kind)` relative to the top-left corner.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|kind| ((i % width) as i32, (i / width) as i32, kind))
        })
    }

    pub fn to_u8_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks_exact(self.width.max(1))
            .map(|row| row.iter().copied().map(cell_value).collect())
            .collect()
    }

    /// Quarter turn in place: transpose, then reverse each row (clockwise) or
    /// the row order (counter-clockwise).
    pub fn rotate(&mut self, dir: RotateDir) {
        self.transpose();
        match dir {
            RotateDir::Cw => {
                for row in self.cells.chunks_exact_mut(self.width.max(1)) {
                    row.reverse();
                }
            }
            RotateDir::Ccw => {
                let (w, h) = (self.width, self.height);
                for y in 0..h / 2 {
                    for x in 0..w {
                        self.cells.swap(y * w + x, (h - 1 - y) * w + x);
                    }
                }
            }
        }
    }

    fn transpose(&mut self) {
        let (w, h) = (self.width, self.height);
        if w == h {
            for y in 0..h {
                for x in 0..y {
                    self.cells.swap(y * w + x, x * w + y);
                }
            }
            return;
        }

        // Rectangular: the transposed matrix is h wide and w tall.
        let mut transposed = vec![None; w * h];
        for y in 0..h {
            for x in 0..w {
                transposed[x * h + y] = self.cells[y * w + x];
            }
        }
        self.cells = transposed;
        self.width = h;
        self.height = w;
    }
}
