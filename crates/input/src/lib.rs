//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. Quitting is a
//! host concern and is reported separately by [`should_quit`].

pub mod map;

pub use neon_tetris_types as types;

pub use map::{handle_key_event, should_quit};
