//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The playfield is fixed at compile time:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn origin**: (`BOARD_WIDTH / 2 - 2`, 0) = (3, 0)
//!
//! # Timing
//!
//! The simulation counts frames, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame clock interval (~60 FPS) |
//! | `DEFAULT_DROP_INTERVAL_FRAMES` | 60 | Frames between gravity drops (~1 row/s) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, Command, InputFrame, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), Color::Purple);
//!
//! let input = InputFrame::default().with(Command::Rotate);
//! assert!(input.rotate);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

const _: () = assert!(
    BOARD_WIDTH >= 4 && BOARD_HEIGHT > 0,
    "board must fit a piece"
);

/// Column of a freshly spawned piece's top-left cell.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of a freshly spawned piece's top-left cell.
pub const SPAWN_Y: i8 = 0;

/// Frame clock interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Frames between automatic one-row descents (60 frames ≈ 1 second)
pub const DEFAULT_DROP_INTERVAL_FRAMES: u32 = 60;

/// Color tag stored in every board cell.
///
/// `Empty` means unoccupied; every other variant is the color of the piece
/// that was locked there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Empty,
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    pub fn is_filled(self) -> bool {
        self != Color::Empty
    }
}

/// The seven piece kinds
///
/// Each kind has a canonical color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [PieceKind; Self::COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index of this kind.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at the given catalog index.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Logical commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, independent of the drop timer
    SoftDrop,
    /// Advance to the next rotation state
    Rotate,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
        }
    }
}

/// Input state sampled once per frame.
///
/// Each flag is the current key-down state, not an edge: holding a key keeps
/// its flag set on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate: bool,
}

impl InputFrame {
    /// Return a copy with the given command's flag set.
    pub fn with(mut self, command: Command) -> Self {
        self.set(command, true);
        self
    }

    pub fn set(&mut self, command: Command, down: bool) {
        match command {
            Command::MoveLeft => self.move_left = down,
            Command::MoveRight => self.move_right = down,
            Command::SoftDrop => self.soft_drop = down,
            Command::Rotate => self.rotate = down,
        }
    }

    pub fn is_down(&self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left,
            Command::MoveRight => self.move_right,
            Command::SoftDrop => self.soft_drop,
            Command::Rotate => self.rotate,
        }
    }

    pub fn is_idle(&self) -> bool {
        !(self.move_left || self.move_right || self.soft_drop || self.rotate)
    }
}

/// Event emitted by the simulation during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece was committed to the board.
    Locked { kind: PieceKind, rows_cleared: u8 },
    /// The newly promoted piece collides at its spawn position.
    PlacementBlocked,
}
