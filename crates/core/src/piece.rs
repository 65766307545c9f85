//! Piece module - a positioned, rotated instance of a catalog entry

use crate::rng::KindSource;
use crate::shapes::{get_shape, rotation_count, Shape};
use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// A piece on (or about to enter) the board.
///
/// `x`/`y` locate the top-left cell of the current rotation state in board
/// coordinates. `shape` is always `catalog[kind][rotation]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: u8,
    pub x: i8,
    pub y: i8,
    shape: Shape,
}

impl Piece {
    /// Create a piece of the given kind at the spawn origin, rotation 0.
    ///
    /// Placement is not validated here; the engine checks it after promoting
    /// the piece.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece at the spawn origin with a kind drawn from `source`.
    pub fn spawn_from(source: &mut impl KindSource) -> Self {
        Self::spawn(source.next_kind())
    }

    /// Create a piece at an arbitrary origin, rotation 0.
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
            shape: get_shape(kind, 0),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn rotation_count(&self) -> u8 {
        rotation_count(self.kind)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Occupied cells as (board column, board row, color).
    ///
    /// Pure function of the piece state; never yields `Color::Empty`.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i8, i8, Color)> + 'static {
        let (x, y) = (self.x, self.y);
        self.shape
            .cells()
            .map(move |(c, r, color)| (x + c, y + r, color))
    }

    /// Same piece translated by (dx, dy).
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotate_forward(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotation_count();
        self.shape = get_shape(self.kind, self.rotation);
    }

    pub fn rotate_backward(&mut self) {
        self.rotation = match self.rotation {
            0 => self.rotation_count() - 1,
            r => r - 1,
        };
        self.shape = get_shape(self.kind, self.rotation);
    }

    /// Set the rotation index directly, reduced modulo the rotation count.
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % self.rotation_count();
        self.shape = get_shape(self.kind, self.rotation);
    }
}
