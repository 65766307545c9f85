//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Command`] and tracks held keys
//! so the game can sample one [`crate::types::InputFrame`] per frame
//! (including on terminals without key-release events).

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, map_key, should_quit, should_restart};
