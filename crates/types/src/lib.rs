//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the simulation core, the
//! terminal renderer and the input mapper alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Both can be overridden per game through the core configuration.
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 800ms |
//! | 2 | 700ms |
//! | 3 | 600ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 300ms |
//! | 7 | 250ms |
//! | 8 | 200ms |
//! | 9 | 150ms |
//! | 10 | 100ms |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Every kind carries its display color
//! assert_eq!(PieceKind::I.color().to_string(), "#00f0f0");
//!
//! // Parse an input intent
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: usize = 20;

/// Lowest level a session can be at
pub const MIN_LEVEL: u32 = 1;

/// Highest level; gravity stops speeding up here
pub const MAX_LEVEL: u32 = 10;

/// Score needed per level step
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Points awarded per row skipped by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Base points per number of rows cleared by one landing, indexed by count.
///
/// Multiplied by the current level when awarded.
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Gravity period per level in milliseconds.
///
/// Index 0 = level 1, index 9 = level 10.
pub const DROP_INTERVALS_MS: [u32; 10] = [800, 700, 600, 500, 400, 300, 250, 200, 150, 100];

/// Width of the zero-padded score shown to the player
pub const SCORE_DISPLAY_DIGITS: usize = 6;

/// 24-bit display color of a tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
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

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Fixed display color of this kind
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::from_hex(0x00f0f0),
            PieceKind::O => Color::from_hex(0xf0f000),
            PieceKind::T => Color::from_hex(0xa000f0),
            PieceKind::S => Color::from_hex(0x00f000),
            PieceKind::Z => Color::from_hex(0xf00000),
            PieceKind::J => Color::from_hex(0x0000f0),
            PieceKind::L => Color::from_hex(0xf0a000),
        }
    }
}

/// Player intents consumed by the session.
///
/// Mapping physical keys to intents is the input collaborator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::Reset => "reset",
        }
    }

    /// Whether the intent moves or reshapes the current piece.
    ///
    /// Movement intents are inert while paused or after game over.
    pub fn is_movement(&self) -> bool {
        !matches!(self, GameAction::TogglePause | GameAction::Reset)
    }
}

/// Cell on the board (None = empty, Some = filled with the landed piece's color)
pub type Cell = Option<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_intervals_cover_every_level() {
        assert_eq!(DROP_INTERVALS_MS.len() as u32, MAX_LEVEL - MIN_LEVEL + 1);
        assert_eq!(DROP_INTERVALS_MS[0], 800);
        assert_eq!(DROP_INTERVALS_MS[9], 100);
        assert!(DROP_INTERVALS_MS.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn line_points_grow_super_linearly() {
        assert_eq!(LINE_POINTS, [0, 100, 300, 500, 800]);
        for lines in 2..LINE_POINTS.len() {
            assert!(LINE_POINTS[lines] > LINE_POINTS[1] * (lines as u32 - 1));
        }
    }

    #[test]
    fn color_hex_roundtrip_and_display() {
        let c = Color::from_hex(0xa000f0);
        assert_eq!(c, Color::new(0xa0, 0x00, 0xf0));
        assert_eq!(c.to_hex(), 0xa000f0);
        assert_eq!(c.to_string(), "#a000f0");
        assert_eq!(PieceKind::J.color().to_string(), "#0000f0");
    }

    #[test]
    fn piece_kind_parsing() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(
                PieceKind::from_str(&kind.as_str().to_uppercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn game_action_parsing() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::TogglePause,
            GameAction::Reset,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("pause"), Some(GameAction::TogglePause));
        assert_eq!(GameAction::from_str("hold"), None);
    }

    #[test]
    fn only_pause_and_reset_are_not_movement() {
        assert!(GameAction::MoveLeft.is_movement());
        assert!(GameAction::HardDrop.is_movement());
        assert!(!GameAction::TogglePause.is_movement());
        assert!(!GameAction::Reset.is_movement());
    }
}
