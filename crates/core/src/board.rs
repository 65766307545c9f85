//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell holds a color, `Color::Empty`
//! meaning unoccupied. Uses a flat array for better cache locality and
//! zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one call to [`Board::clear_full_rows`].
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Color; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Color> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, color: Color) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    ///
    /// Out-of-bounds positions are not occupied; bounds are the collision
    /// test's concern.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c.is_filled())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Color]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Write every occupied cell of `piece` with the piece's color.
    ///
    /// Cells outside the board are skipped; the engine only locks pieces it
    /// has already checked.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y, color) in piece.occupied_cells() {
            self.set(x, y, color);
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted top to bottom)
    ///
    /// Full rows are collected first and the remaining rows compacted
    /// downward in a single two-pointer pass, so rows that slide down are never
    /// re-examined.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    let dst_start = write_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(Color::Empty);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Set every cell to empty.
    pub fn reset(&mut self) {
        self.cells.fill(Color::Empty);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Copy the board into a row-major grid.
    pub fn write_grid(&self, out: &mut [[Color; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Build a board from rows (top first). Missing rows and cells are empty,
    /// extra ones are ignored.
    pub fn from_rows<R: AsRef<[Color]>>(rows: &[R]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().take(HEIGHT).enumerate() {
            for (x, &cell) in row.as_ref().iter().take(WIDTH).enumerate() {
                board.cells[y * WIDTH + x] = cell;
            }
        }
        board
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.rows().map(<[Color]>::to_vec).collect()
    }

    /// Fill row `y` with `color`, optionally leaving one column empty.
    pub fn fill_row(&mut self, y: usize, color: Color, hole: Option<usize>) {
        if y >= HEIGHT {
            return;
        }
        for x in 0..WIDTH {
            let cell = if Some(x) == hole { Color::Empty } else { color };
            self.cells[y * WIDTH + x] = cell;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Color::Cyan);
        board.set(5, 10, Color::Purple);

        assert_eq!(board.get(0, 0), Some(Color::Cyan));
        assert_eq!(board.get(5, 10), Some(Color::Purple));

        assert_eq!(board.cells[0], Color::Cyan);
        assert_eq!(board.cells[10 * 10 + 5], Color::Purple);
    }

    #[test]
    fn test_board_from_rows_roundtrip() {
        let mut rows = vec![vec![Color::Empty; 10]; 20];
        rows[5][3] = Color::Yellow;
        rows[10][7] = Color::Orange;

        let board = Board::from_rows(&rows);
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_lock_skips_cells_above_board() {
        let mut board = Board::new();
        let mut piece = Piece::at(PieceKind::I, 0, -3);
        piece.set_rotation(1);
        board.lock(&piece);
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.get(0, 0), Some(Color::Cyan));
    }

    #[test]
    fn test_write_grid_matches_cells() {
        let mut board = Board::new();
        board.set(2, 19, Color::Green);
        let mut grid = [[Color::Empty; WIDTH]; HEIGHT];
        board.write_grid(&mut grid);
        assert_eq!(grid[19][2], Color::Green);
        assert_eq!(grid.iter().flatten().filter(|c| c.is_filled()).count(), 1);
    }
}
