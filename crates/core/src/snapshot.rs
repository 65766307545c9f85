use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Upper bound on filled cells in one rotation state (a 4x4 matrix).
pub const MAX_PIECE_CELLS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCell {
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    /// Occupied cells in board coordinates.
    pub cells: ArrayVec<PieceCell, MAX_PIECE_CELLS>,
}

impl PieceSnapshot {
    pub fn write_from(&mut self, piece: &Piece) {
        self.kind = piece.kind();
        self.rotation = piece.rotation();
        self.x = piece.x;
        self.y = piece.y;
        self.cells.clear();
        self.cells.extend(
            piece
                .occupied_cells()
                .take(MAX_PIECE_CELLS)
                .map(|(x, y, color)| PieceCell { x, y, color }),
        );
    }

    /// Cells relative to the piece origin, for preview panels.
    pub fn local_cells(&self) -> impl Iterator<Item = PieceCell> + '_ {
        self.cells.iter().map(|c| PieceCell {
            x: c.x - self.x,
            y: c.y - self.y,
            color: c.color,
        })
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        let mut s = Self {
            kind: piece.kind(),
            rotation: 0,
            x: 0,
            y: 0,
            cells: ArrayVec::new(),
        };
        s.write_from(piece);
        s
    }
}

/// Read-only view handed to the presentation layer every frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Color; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: PieceSnapshot,
    pub next: PieceSnapshot,
    /// Set when a blocked spawn stopped the game.
    pub halted: bool,
    pub frame_counter: u32,
}

impl GameSnapshot {
    pub fn new(board: &Board, active: &Piece, next: &Piece) -> Self {
        let mut s = Self {
            board: [[Color::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: PieceSnapshot::from(active),
            next: PieceSnapshot::from(next),
            halted: false,
            frame_counter: 0,
        };
        board.write_grid(&mut s.board);
        s
    }

    /// Overwrite this snapshot in place without allocating.
    pub fn write_from(&mut self, board: &Board, active: &Piece, next: &Piece) {
        board.write_grid(&mut self.board);
        self.active.write_from(active);
        self.next.write_from(next);
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }
}
