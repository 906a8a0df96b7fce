//! Engine - drives a session in time
//!
//! `core` knows nothing about clocks. This crate adds them:
//!
//! - [`clock`]: the gravity timer, fed elapsed milliseconds by its host
//! - [`game_loop`]: one session plus its timer, events applied one at a time
//! - [`actor`]: the same loop on a tokio task, for hosts with several threads

pub mod actor;
pub mod clock;
pub mod game_loop;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use actor::{spawn, GameHandle};
pub use clock::GravityTimer;
pub use game_loop::GameLoop;
