use blockfall_core::{Board, Piece};
use blockfall_types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Would `piece`'s current rotation state collide if its origin were (x, y)?
///
/// A cell collides when it is left of column 0, right of the last column,
/// below the last row, or on an occupied board cell. Cells above row 0 never
/// collide.
pub fn collision(board: &Board, piece: &Piece, x: i8, y: i8) -> bool {
    piece.shape().cells().any(|(c, r, _)| {
        let bx = x + c;
        let by = y + r;
        bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 || board.is_occupied(bx, by)
    })
}
