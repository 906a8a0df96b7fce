//! Neon Tetris (workspace facade crate).
//!
//! Re-exports `neon_tetris::{core,engine,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use neon_tetris_core as core;
pub use neon_tetris_engine as engine;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;
