//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Each row is an independently owned array, so a cleared row is always replaced by
//! a fresh empty one rather than shared with another row.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are allowed for pieces but never stored.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::pieces::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One board row
pub type Row = [Cell; WIDTH];

/// Row indices removed by a single clear, bottom to top
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The game board - 10 columns x 20 rows
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: [Row; HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [[None; WIDTH]; HEIGHT],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Whether `shape` fits with its anchor at (x, y).
    ///
    /// A mino fails if its column is outside the board or its row is at or
    /// below the bottom. Minos above the top (row < 0) skip the occupancy check.
    pub fn fits(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape.cells.iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Check the piece shifted by (dx, dy), optionally with another shape
    /// (e.g. a rotation candidate) in place of its current one
    pub fn is_valid_position(
        &self,
        piece: &Piece,
        dx: i8,
        dy: i8,
        override_shape: Option<&PieceShape>,
    ) -> bool {
        let shape = override_shape.unwrap_or_else(|| piece.shape());
        self.fits(shape, piece.x + dx, piece.y + dy)
    }

    /// Write the piece's kind into every on-board cell it covers.
    /// Cells above the top are dropped. Does not clear lines.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// Clear all full rows in one pass and return their indices (bottom to top)
    ///
    /// Remaining rows keep their relative order and slide down; the vacated rows
    /// at the top are replaced with new empty rows, so the height stays constant.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.rows[write_y] = self.rows[read_y];
                }
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = [None; WIDTH];
        }

        cleared_rows
    }

    /// Height of column `x`, measured from the bottom to its highest filled cell
    pub fn column_height(&self, x: usize) -> u8 {
        self.rows
            .iter()
            .position(|row| row.get(x).is_some_and(|c| c.is_some()))
            .map_or(0, |top| (HEIGHT - top) as u8)
    }

    /// Write the grid as piece ids (0 = empty, 1..=7 = kind)
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, cell) in dst.iter_mut().zip(src.iter()) {
                *d = cell.map_or(0, PieceKind::id);
            }
        }
    }

    /// Fill a whole row (for tests and tooling)
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if let Some(row) = self.rows.get_mut(y) {
            *row = [Some(kind); WIDTH];
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
