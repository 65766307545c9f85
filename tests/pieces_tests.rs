//! Piece and shape catalog tests

use blockfall::core::shapes::{rotations, validate_rotations};
use blockfall::core::{get_shape, rotation_count, ConfigError, FixedSequence, Piece, Shape};
use blockfall::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

fn cells(piece: &Piece) -> Vec<(i8, i8)> {
    piece.occupied_cells().map(|(x, y, _)| (x, y)).collect()
}

#[test]
fn test_spawn_position() {
    assert_eq!((SPAWN_X, SPAWN_Y), (3, 0));
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.kind(), kind);
    }
}

#[test]
fn test_spawn_from_source() {
    let mut source = FixedSequence::new([PieceKind::S, PieceKind::J]);
    assert_eq!(Piece::spawn_from(&mut source).kind(), PieceKind::S);
    assert_eq!(Piece::spawn_from(&mut source).kind(), PieceKind::J);
    assert_eq!(Piece::spawn_from(&mut source).kind(), PieceKind::S);
}

#[test]
fn test_canonical_colors() {
    let expected = [
        (PieceKind::I, Color::Cyan),
        (PieceKind::O, Color::Yellow),
        (PieceKind::T, Color::Purple),
        (PieceKind::S, Color::Green),
        (PieceKind::Z, Color::Red),
        (PieceKind::J, Color::Blue),
        (PieceKind::L, Color::Orange),
    ];
    for (kind, color) in expected {
        assert_eq!(Piece::spawn(kind).color(), color);
        for shape in rotations(kind) {
            assert!(shape.cells().all(|(_, _, c)| c == color));
        }
    }
}

#[test]
fn test_occupied_cells_never_empty() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::at(kind, 2, 7);
        for _ in 0..piece.rotation_count() {
            let all: Vec<_> = piece.occupied_cells().collect();
            assert_eq!(all.len(), 4, "{:?} rotation {}", kind, piece.rotation());
            assert!(all.iter().all(|&(_, _, c)| c.is_filled()));
            piece.rotate_forward();
        }
    }
}

#[test]
fn test_occupied_cells_offset_by_origin() {
    let piece = Piece::at(PieceKind::T, 4, 10);
    assert_eq!(cells(&piece), vec![(5, 10), (4, 11), (5, 11), (6, 11)]);

    let moved = piece.offset(-1, 2);
    assert_eq!(cells(&moved), vec![(4, 12), (3, 13), (4, 13), (5, 13)]);
}

#[test]
fn test_occupied_cells_restartable() {
    let piece = Piece::spawn(PieceKind::Z);
    assert_eq!(cells(&piece), cells(&piece));
}

#[test]
fn test_rotate_forward_round_trip() {
    for kind in PieceKind::ALL {
        let start = Piece::spawn(kind);
        let mut piece = start;
        for _ in 0..rotation_count(kind) {
            piece.rotate_forward();
        }
        assert_eq!(piece.rotation(), start.rotation(), "{:?}", kind);
        assert_eq!(piece.shape(), start.shape(), "{:?}", kind);
    }
}

#[test]
fn test_rotate_backward_wraps() {
    let mut t = Piece::spawn(PieceKind::T);
    t.rotate_backward();
    assert_eq!(t.rotation(), 3);
    assert_eq!(t.shape(), get_shape(PieceKind::T, 3));

    let mut o = Piece::spawn(PieceKind::O);
    o.rotate_backward();
    assert_eq!(o.rotation(), 0);
}

#[test]
fn test_backward_undoes_forward() {
    for kind in PieceKind::ALL {
        let start = Piece::spawn(kind);
        let mut piece = start;
        piece.rotate_forward();
        piece.rotate_backward();
        assert_eq!(piece, start);
    }
}

#[test]
fn test_i_rotation_dimensions() {
    let mut i = Piece::spawn(PieceKind::I);
    assert_eq!((i.shape().width(), i.shape().height()), (4, 1));
    i.rotate_forward();
    assert_eq!((i.shape().width(), i.shape().height()), (1, 4));
    assert_eq!(cells(&i), vec![(3, 0), (3, 1), (3, 2), (3, 3)]);
}

#[test]
fn test_get_shape_wraps_rotation() {
    assert_eq!(get_shape(PieceKind::S, 2), get_shape(PieceKind::S, 0));
    assert_eq!(get_shape(PieceKind::L, 5), get_shape(PieceKind::L, 1));
}

#[test]
fn test_validate_rejects_malformed_tables() {
    static RAGGED: [Shape; 1] = [Shape::new(&[&[Color::Red, Color::Red], &[Color::Red]])];
    static HOLLOW: [Shape; 1] = [Shape::new(&[&[Color::Empty, Color::Empty]])];
    static WRONG: [Shape; 1] = [Shape::new(&[&[Color::Cyan]])];

    assert_eq!(
        validate_rotations(PieceKind::Z, &[]),
        Err(ConfigError::EmptyRotationTable { kind: PieceKind::Z })
    );
    assert_eq!(
        validate_rotations(PieceKind::Z, &RAGGED),
        Err(ConfigError::RaggedShape {
            kind: PieceKind::Z,
            rotation: 0
        })
    );
    assert_eq!(
        validate_rotations(PieceKind::Z, &HOLLOW),
        Err(ConfigError::EmptyShape {
            kind: PieceKind::Z,
            rotation: 0
        })
    );
    assert!(matches!(
        validate_rotations(PieceKind::Z, &WRONG),
        Err(ConfigError::WrongColor { .. })
    ));
}
