//! Configuration for a game session

use crate::error::{ConfigError, Result};
use crate::shape::MAX_SHAPE_SIZE;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Smallest board edge: every piece must fit at spawn
pub const MIN_BOARD_EDGE: usize = MAX_SHAPE_SIZE;

/// Largest board edge
pub const MAX_BOARD_EDGE: usize = 64;

/// Main configuration for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in cells
    pub width: usize,

    /// Board height in cells
    pub height: usize,

    /// Piece RNG seed (OS entropy if None)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the piece RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the dimensions are within `MIN_BOARD_EDGE..=MAX_BOARD_EDGE`
    pub fn validate(&self) -> Result<()> {
        let range = MIN_BOARD_EDGE..=MAX_BOARD_EDGE;
        if !range.contains(&self.width) {
            return Err(ConfigError::InvalidWidth {
                width: self.width,
                min: MIN_BOARD_EDGE,
                max: MAX_BOARD_EDGE,
            });
        }
        if !range.contains(&self.height) {
            return Err(ConfigError::InvalidHeight {
                height: self.height,
                min: MIN_BOARD_EDGE,
                max: MAX_BOARD_EDGE,
            });
        }
        Ok(())
    }
}
