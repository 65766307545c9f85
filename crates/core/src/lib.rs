//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the data side of the simulation: the shape catalog,
//! pieces, the board, piece kind sources, configuration, and the render
//! snapshot. It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is exercised by unit tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 color grid with row clearing
//! - [`config`]: Startup configuration and [`ConfigError`]
//! - [`piece`]: Positioned, rotated piece instances
//! - [`rng`]: Uniform kind selection behind the [`KindSource`] trait
//! - [`shapes`]: Static rotation tables for the seven kinds
//! - [`snapshot`]: Read-only state handed to the renderer
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Piece};
//! use blockfall_core::types::{Color, PieceKind};
//!
//! let mut board = Board::new();
//! let piece = Piece::at(PieceKind::O, 4, 18);
//! board.lock(&piece);
//!
//! assert_eq!(board.get(4, 18), Some(Color::Yellow));
//! assert_eq!(board.filled_count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{BlockedPolicy, ConfigError, GameConfig};
pub use piece::Piece;
pub use rng::{FixedSequence, KindSource, SimpleRng};
pub use shapes::{get_shape, rotation_count, validate_catalog, Shape};
pub use snapshot::{GameSnapshot, PieceCell, PieceSnapshot};
