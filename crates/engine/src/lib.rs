//! Simulation engine - collision, locking, row clearing and the per-frame tick
//!
//! ```
//! use blockfall_engine::Game;
//! use blockfall_core::{FixedSequence, GameConfig};
//! use blockfall_types::{Command, InputFrame, PieceKind};
//!
//! let mut game = Game::new(GameConfig::default(), FixedSequence::repeat(PieceKind::T)).unwrap();
//! game.tick(InputFrame::default().with(Command::MoveLeft));
//! assert_eq!(game.active().x, 2);
//! ```

pub mod collision;
pub mod game;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use collision::collision;
pub use game::{Game, TickEvents};
