//! Shapes module - the static shape catalog
//!
//! Each piece kind owns an ordered sequence of rotation states. A rotation
//! state is a small rectangular matrix of colors; `Color::Empty` marks a hole.
//! The number of states differs per kind (I, S, Z have two, O has one, T, J, L
//! have four), so all rotation arithmetic goes through [`rotation_count`].

use crate::types::{Color, PieceKind, BOARD_WIDTH};
use crate::ConfigError;

/// One rotation state: a rectangular color matrix, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: &'static [&'static [Color]],
}

impl Shape {
    pub const fn new(rows: &'static [&'static [Color]]) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> u8 {
        self.rows.first().map_or(0, |row| row.len() as u8)
    }

    pub fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    pub fn rows(&self) -> &'static [&'static [Color]] {
        self.rows
    }

    /// Color at (col, row) within the matrix, `None` outside it.
    pub fn get(&self, col: u8, row: u8) -> Option<Color> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Non-empty cells as (col, row, color), relative to the matrix origin.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Color)> + 'static {
        let rows = self.rows;
        rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_filled())
                .map(move |(c, &cell)| (c as i8, r as i8, cell))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }
}

const E: Color = Color::Empty;
const C: Color = Color::Cyan;
const Y: Color = Color::Yellow;
const P: Color = Color::Purple;
const G: Color = Color::Green;
const R: Color = Color::Red;
const B: Color = Color::Blue;
const O: Color = Color::Orange;

static I_STATES: [Shape; 2] = [
    Shape::new(&[&[C, C, C, C]]),
    Shape::new(&[&[C], &[C], &[C], &[C]]),
];

static O_STATES: [Shape; 1] = [Shape::new(&[&[Y, Y], &[Y, Y]])];

static T_STATES: [Shape; 4] = [
    Shape::new(&[&[E, P, E], &[P, P, P]]),
    Shape::new(&[&[E, P], &[P, P], &[E, P]]),
    Shape::new(&[&[P, P, P], &[E, P, E]]),
    Shape::new(&[&[P, E], &[P, P], &[P, E]]),
];

static S_STATES: [Shape; 2] = [
    Shape::new(&[&[E, G, G], &[G, G, E]]),
    Shape::new(&[&[G, E], &[G, G], &[E, G]]),
];

static Z_STATES: [Shape; 2] = [
    Shape::new(&[&[R, R, E], &[E, R, R]]),
    Shape::new(&[&[E, R], &[R, R], &[R, E]]),
];

static J_STATES: [Shape; 4] = [
    Shape::new(&[&[B, E, E], &[B, B, B]]),
    Shape::new(&[&[B, B], &[B, E], &[B, E]]),
    Shape::new(&[&[B, B, B], &[E, E, B]]),
    Shape::new(&[&[E, B], &[E, B], &[B, B]]),
];

static L_STATES: [Shape; 4] = [
    Shape::new(&[&[E, E, O], &[O, O, O]]),
    Shape::new(&[&[O, E], &[O, E], &[O, O]]),
    Shape::new(&[&[O, O, O], &[O, E, E]]),
    Shape::new(&[&[O, O], &[E, O], &[E, O]]),
];

/// Rotation states for a kind, in rotation order.
pub fn rotations(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

pub fn rotation_count(kind: PieceKind) -> u8 {
    rotations(kind).len() as u8
}

/// Shape for a kind and rotation index.
///
/// The index is reduced modulo the kind's rotation count, so any value is
/// accepted.
pub fn get_shape(kind: PieceKind, rotation: u8) -> Shape {
    let states = rotations(kind);
    states[rotation as usize % states.len()]
}

/// Check the whole catalog.
///
/// Called once at startup; the simulation has no defined behavior for a
/// malformed table.
pub fn validate_catalog() -> Result<(), ConfigError> {
    for kind in PieceKind::ALL {
        validate_rotations(kind, rotations(kind))?;
    }
    Ok(())
}

/// Check one kind's rotation table.
pub fn validate_rotations(kind: PieceKind, states: &[Shape]) -> Result<(), ConfigError> {
    if states.is_empty() {
        return Err(ConfigError::EmptyRotationTable { kind });
    }

    for (rotation, shape) in states.iter().enumerate() {
        let width = shape.width();
        if shape.height() == 0 || width == 0 {
            return Err(ConfigError::EmptyShape { kind, rotation });
        }
        if shape.rows().iter().any(|row| row.len() != width as usize) {
            return Err(ConfigError::RaggedShape { kind, rotation });
        }
        if width > BOARD_WIDTH {
            return Err(ConfigError::ShapeTooWide {
                kind,
                rotation,
                width,
            });
        }
        if shape.filled_count() == 0 {
            return Err(ConfigError::EmptyShape { kind, rotation });
        }
        if let Some((_, _, color)) = shape.cells().find(|&(_, _, c)| c != kind.color()) {
            return Err(ConfigError::WrongColor {
                kind,
                rotation,
                color,
            });
        }
    }

    Ok(())
}
