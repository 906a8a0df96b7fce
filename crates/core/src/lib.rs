//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and the session state machine. It has
//! **no dependencies** on timers, terminals, or I/O: a driver calls
//! [`Session::tick`] once per gravity period and forwards player intents via
//! [`Session::apply_action`].
//!
//! # Module Structure
//!
//! - [`shape`]: N×N occupancy grids and clockwise rotation
//! - [`catalog`]: the seven tetromino definitions and uniform selection
//! - [`board`]: the playfield grid, collision checks and row clearing
//! - [`piece`]: spawning, moving, rotating and hard-drop distance
//! - [`rng`]: where new pieces come from (seeded or scripted)
//! - [`scoring`]: line points, levels and gravity speed
//! - [`session`]: the Running / Paused / GameOver state machine
//! - [`snapshot`]: read-only view handed to renderers
//! - [`config`]: board size and seed, validated before a session starts
//!
//! # Rules
//!
//! - Pieces spawn horizontally centered at the top row.
//! - Rotation is clockwise only, applied in place, with no wall kicks.
//! - A piece that cannot fall on a gravity tick is merged into the board,
//!   full rows are cleared, and the next piece takes its place.
//! - Clearing 1/2/3/4 rows awards 100/300/500/800 points times the level.
//! - A hard drop moves the piece to its resting row and awards 2 points per
//!   row; the piece lands on the following tick.
//! - If a newly spawned piece does not fit, the game is over.
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::{GameConfig, Session};
//! use neon_tetris_types::GameAction;
//!
//! let mut game = Session::new(&GameConfig::new().with_seed(12345)).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! game.tick(); // lands the piece
//! assert!(game.board().filled_count() > 0);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{definition, random_piece, shapes_of, TetrominoDef, CATALOG};
pub use config::{GameConfig, MAX_BOARD_EDGE, MIN_BOARD_EDGE};
pub use error::ConfigError;
pub use piece::{hard_drop_distance, rotate, spawn, try_move, Piece, Position};
pub use rng::{FixedPieces, PieceSource, RandomPieces};
pub use scoring::{drop_interval_ms, format_score, hard_drop_points, level_for_score, line_clear_points};
pub use session::{Landing, Session, SessionState, TickOutcome};
pub use shape::{Shape, ShapeCells};
pub use snapshot::{GameSnapshot, PieceSnapshot};
