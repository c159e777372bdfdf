//! Board module - owns the playfield grid
//!
//! The grid is a flat row-major buffer of cell values, `width * height` long,
//! with a permanent wall (value 9) in the leftmost and rightmost columns and
//! the bottom row. Everything else is the interior where pieces lock.
//! Coordinates: (x, y) with x growing to the right and y growing downward;
//! row 0 is the top of the field and has no wall above it.

use tracing::debug;

use crate::pieces::Tetromino;
use crate::types::{
    ContractError, CELL_CLEARING, CELL_EMPTY, CELL_WALL, FIELD_HEIGHT, FIELD_WIDTH,
    MAX_FIELD_HEIGHT, MAX_FIELD_WIDTH, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH,
};

/// The playfield, walls included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Board {
    /// Create an empty 12x18 field.
    pub fn new() -> Self {
        Self::walled(FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Create an empty field of the given outer size.
    pub fn with_size(width: usize, height: usize) -> Result<Self, ContractError> {
        if width < MIN_FIELD_WIDTH || height < MIN_FIELD_HEIGHT {
            return Err(ContractError::FieldTooSmall { width, height });
        }
        if width > MAX_FIELD_WIDTH || height > MAX_FIELD_HEIGHT {
            return Err(ContractError::FieldTooLarge { width, height });
        }
        Ok(Self::walled(width, height))
    }

    fn walled(width: usize, height: usize) -> Self {
        let mut board = Self {
            width,
            height,
            cells: vec![CELL_EMPTY; width * height],
        };
        for y in 0..height {
            for x in 0..width {
                if board.is_wall_position(x, y) {
                    board.cells[y * width + x] = CELL_WALL;
                }
            }
        }
        board
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    #[inline(always)]
    fn is_wall_position(&self, x: usize, y: usize) -> bool {
        x == 0 || x == self.width - 1 || y == self.height - 1
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns between the two side walls.
    pub fn interior_width(&self) -> usize {
        self.width - 2
    }

    /// Rows above the bottom wall.
    pub fn interior_height(&self) -> usize {
        self.height - 1
    }

    /// Cell value at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether (x, y) is part of the permanent wall.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some() && self.is_wall_position(x as usize, y as usize)
    }

    /// Overwrite an interior cell.
    ///
    /// Returns false, leaving the grid untouched, for positions outside the
    /// buffer, wall positions, and the wall value itself.
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        if value >= CELL_WALL || self.is_wall(x, y) {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Write the piece's filled cells into the grid as `kind + 1`.
    ///
    /// The caller has already established that the piece cannot descend.
    /// Cells that fall outside the buffer or onto the wall are skipped.
    /// Returns the number of cells written.
    pub fn lock(&mut self, piece: &Tetromino) -> usize {
        let value = piece.kind.cell_value();
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, value) {
                written += 1;
            }
        }
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            written,
            "piece locked"
        );
        written
    }

    /// Whether every interior cell of row `y` is non-empty.
    ///
    /// The bottom wall row is never complete.
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= self.interior_height() {
            return false;
        }
        self.interior(y).iter().all(|cell| *cell != CELL_EMPTY)
    }

    /// Mark every completed row with the clearing sentinel and append its
    /// index to `out`, top to bottom. Returns how many rows were marked.
    pub fn scan_completed_rows_into(&mut self, out: &mut Vec<usize>) -> usize {
        let mut marked = 0;
        for y in 0..self.interior_height() {
            if self.is_row_complete(y) {
                self.interior_mut(y).fill(CELL_CLEARING);
                out.push(y);
                marked += 1;
            }
        }
        if marked > 0 {
            debug!(rows = marked, "rows marked for clearing");
        }
        marked
    }

    /// Allocating convenience over [`Board::scan_completed_rows_into`].
    pub fn scan_completed_rows(&mut self) -> Vec<usize> {
        let mut rows = Vec::new();
        self.scan_completed_rows_into(&mut rows);
        rows
    }

    /// Remove a single row: in every interior column the cells above `row`
    /// move down by one and the top cell becomes empty.
    pub fn collapse_row(&mut self, row: usize) {
        debug_assert!(
            row < self.interior_height(),
            "collapse_row({}) outside the interior",
            row
        );
        if row >= self.interior_height() {
            return;
        }
        let width = self.width;
        for x in 1..width - 1 {
            for y in (1..=row).rev() {
                self.cells[y * width + x] = self.cells[(y - 1) * width + x];
            }
            self.cells[x] = CELL_EMPTY;
        }
    }

    /// Collapse every row in `rows`, one at a time in list order, draining
    /// the list.
    ///
    /// Rows recorded by [`Board::scan_completed_rows_into`] are in ascending
    /// order, so each collapse only moves rows above the ones still pending.
    pub fn collapse_rows(&mut self, rows: &mut Vec<usize>) {
        for row in rows.drain(..) {
            self.collapse_row(row);
        }
    }

    /// Number of interior cells that are not empty.
    pub fn occupied_count(&self) -> usize {
        (0..self.interior_height())
            .map(|y| self.interior(y).iter().filter(|c| **c != CELL_EMPTY).count())
            .sum()
    }

    /// Full row `y`, walls included.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    fn interior(&self, y: usize) -> &[u8] {
        let start = y * self.width + 1;
        &self.cells[start..start + self.width - 2]
    }

    fn interior_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width + 1;
        let end = start + self.width - 2;
        &mut self.cells[start..end]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Reset the interior to empty, keeping the walls.
    pub fn clear(&mut self) {
        for y in 0..self.interior_height() {
            self.interior_mut(y).fill(CELL_EMPTY);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
