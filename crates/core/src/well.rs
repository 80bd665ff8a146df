//! Well module - the fixed-size playing field
//!
//! Cells are stored in a flat row-major buffer for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Dimensions are fixed at construction; the only writers are
//! [`merge`](crate::collision::merge) and [`sweep`](crate::sweep::sweep).

use crate::error::GridError;
use crate::types::{cell_value, Cell, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Well {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Well {
    /// Create an empty well. Fails when either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        let (width, height) = (width as usize, height as usize);
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Build a well from numeric rows (0 = empty, 1..=7 = colour id).
    ///
    /// ```
    /// use tui_blockfall_core::Well;
    ///
    /// let well = Well::from_rows(&[&[0, 0, 0], &[4, 4, 0]]).unwrap();
    /// assert_eq!(well.width(), 3);
    /// assert_eq!(well.cell_value(0, 1), Some(4));
    /// ```
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
                let cell = match value {
                    0 => None,
                    v => Some(
                        PieceKind::from_color_id(v)
                            .ok_or(GridError::InvalidCellValue { value: v, x, y })?,
                    ),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Numeric cell value at (x, y), `None` when out of bounds.
    pub fn cell_value(&self, x: i32, y: i32) -> Option<u8> {
        self.get(x, y).map(cell_value)
    }

    /// True when (x, y) is inside the well and filled.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True when (x, y) is outside the well or filled.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(Option::is_some))
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is filled.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Numeric snapshot, row 0 first.
    pub fn to_u8_grid(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().copied().map(cell_value).collect())
            .collect()
    }

    /// Empty every cell in place.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Remove row `y`, shift every row above it down by one and empty row 0.
    pub(crate) fn remove_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }
}

impl Default for Well {
    fn default() -> Self {
        Self {
            width: DEFAULT_COLS as usize,
            height: DEFAULT_ROWS as usize,
            cells: vec![None; DEFAULT_COLS as usize * DEFAULT_ROWS as usize],
        }
    }
}
