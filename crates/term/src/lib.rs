//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a simple framebuffer that
//! is then flushed to the terminal.
//!
//! Each board cell is drawn 2 columns wide by default so blocks look square
//! in typical terminal fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{queue_changed_spans, queue_full_frame, TerminalRenderer};
