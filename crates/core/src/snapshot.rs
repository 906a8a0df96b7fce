use serde::Serialize;

use crate::catalog::definition;
use crate::piece::{Piece, Position};
use crate::scoring::format_score;
use crate::shape::{Shape, ShapeCells};
use crate::types::{Cell, Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            shape: value.shape,
            x: value.position.x,
            y: value.position.y,
        }
    }
}

impl PieceSnapshot {
    /// Occupied cells relative to the shape box (for previews)
    pub fn shape_cells(&self) -> ShapeCells {
        self.shape.cells()
    }

    /// Occupied cells in board coordinates
    pub fn board_cells(&self) -> ShapeCells {
        self.shape
            .cells()
            .iter()
            .map(|&(sx, sy)| (self.x + sx, self.y + sy))
            .collect()
    }
}

impl Default for PieceSnapshot {
    fn default() -> Self {
        Piece::new(definition(PieceKind::I), Position::default()).into()
    }
}

/// Read-only view of a session for render collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major landed cells (the current piece is not merged in)
    pub cells: Vec<Cell>,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Landed cell at (x, y); out of range reads as empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied().flatten()
    }

    pub fn score_display(&self) -> String {
        format_score(self.score)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
