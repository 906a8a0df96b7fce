//! Piece controller - spawning, moving, rotating and dropping the active piece
//!
//! All operations are pure: they take the current piece and the board and
//! return a new piece (or nothing), leaving the caller to decide what a
//! rejected move means. A move into a wall or another block is a normal
//! outcome, never an error.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::catalog::{definition, TetrominoDef};
use crate::rng::PieceSource;
use crate::shape::{Shape, MAX_SHAPE_CELLS};
use crate::types::{Color, PieceKind};

/// Top-left anchor of a shape's bounding box in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub position: Position,
}

impl Piece {
    /// Create a piece from a catalog definition at an explicit position
    pub fn new(def: &TetrominoDef, position: Position) -> Self {
        Self {
            kind: def.kind,
            shape: def.shape,
            color: def.color,
            position,
        }
    }

    /// Create a piece of `kind` at the spawn position for a board this wide.
    ///
    /// `x = floor(width / 2) - floor(shape_width / 2)`, `y = 0`. Odd shape
    /// widths end up one cell left of true center.
    pub fn at_spawn(kind: PieceKind, board_width: usize) -> Self {
        let def = definition(kind);
        let x = (board_width / 2) as i32 - (def.shape.width() / 2) as i32;
        Self::new(def, Position::new(x, 0))
    }

    /// Absolute board coordinates of every occupied cell.
    ///
    /// Coordinates saturate at the `i32` limits instead of wrapping.
    pub fn cells(&self) -> ArrayVec<(i32, i32), MAX_SHAPE_CELLS> {
        self.shape
            .cells()
            .iter()
            .map(|&(sx, sy)| {
                (
                    self.position.x.saturating_add(sx),
                    self.position.y.saturating_add(sy),
                )
            })
            .collect()
    }

    /// Whether the piece fits where it currently is
    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_position(&self.shape, self.position, 0, 0)
    }

    /// Copy of this piece shifted by `(dx, dy)`, without any validity check
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: Position::new(
                self.position.x.saturating_add(dx),
                self.position.y.saturating_add(dy),
            ),
            ..*self
        }
    }
}

/// Draw the next kind from `source` and place it at the spawn position
pub fn spawn<S: PieceSource + ?Sized>(source: &mut S, board_width: usize) -> Piece {
    Piece::at_spawn(source.next_kind(), board_width)
}

/// Rotate the piece's current shape 90° clockwise in place.
///
/// The rotation is applied to whatever orientation the piece is in now.
/// If the rotated shape does not fit at the same anchor, the original piece
/// is returned unchanged. No wall kicks are attempted.
pub fn rotate(piece: &Piece, board: &Board) -> Piece {
    let rotated = Piece {
        shape: piece.shape.rotated_cw(),
        ..*piece
    };
    if rotated.fits(board) {
        rotated
    } else {
        *piece
    }
}

/// Move the piece by `(dx, dy)` if the destination is valid
pub fn try_move(piece: &Piece, board: &Board, dx: i32, dy: i32) -> Option<Piece> {
    if board.is_valid_position(&piece.shape, piece.position, dx, dy) {
        Some(piece.shifted(dx, dy))
    } else {
        None
    }
}

/// Largest downward offset the piece can travel before colliding.
///
/// A piece that is already resting (or does not fit at all) returns 0.
pub fn hard_drop_distance(piece: &Piece, board: &Board) -> u32 {
    let mut distance: i32 = 0;
    // Every extra row moves at least one cell further down, so the board
    // height bounds the search.
    let limit = board.height() as i32;
    while distance < limit
        && board.is_valid_position(&piece.shape, piece.position, 0, distance + 1)
    {
        distance += 1;
    }
    distance as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedPieces;

    #[test]
    fn test_spawn_centering() {
        assert_eq!(Piece::at_spawn(PieceKind::I, 10).position, Position::new(3, 0));
        assert_eq!(Piece::at_spawn(PieceKind::O, 10).position, Position::new(4, 0));
        assert_eq!(Piece::at_spawn(PieceKind::T, 10).position, Position::new(4, 0));
        assert_eq!(Piece::at_spawn(PieceKind::T, 7).position, Position::new(2, 0));
    }

    #[test]
    fn test_spawn_draws_from_source() {
        let mut src = FixedPieces::new([PieceKind::L, PieceKind::S]);
        assert_eq!(spawn(&mut src, 10).kind, PieceKind::L);
        assert_eq!(spawn(&mut src, 10).kind, PieceKind::S);
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::at_spawn(PieceKind::O, 10).shifted(1, 2);
        let cells = piece.cells();
        assert_eq!(cells.as_slice(), &[(5, 2), (6, 2), (5, 3), (6, 3)]);
    }

    #[test]
    fn test_cells_and_shift_saturate_near_i32_max() {
        let piece = Piece::new(definition(PieceKind::O), Position::new(i32::MAX, i32::MAX));
        assert!(piece.cells().iter().all(|&c| c == (i32::MAX, i32::MAX)));
        assert_eq!(piece.shifted(1, 1).position, piece.position);
        assert_eq!(piece.shifted(-1, 0).position.x, i32::MAX - 1);
    }

    #[test]
    fn test_try_move_rejects_walls() {
        let board = Board::standard();
        let piece = Piece::new(definition(PieceKind::O), Position::new(0, 0));
        assert!(try_move(&piece, &board, -1, 0).is_none());
        assert!(try_move(&piece, &board, 0, -1).is_none());
        let moved = try_move(&piece, &board, 1, 1).unwrap();
        assert_eq!(moved.position, Position::new(1, 1));
    }

    #[test]
    fn test_hard_drop_distance_on_empty_board() {
        let board = Board::standard();
        let o = Piece::at_spawn(PieceKind::O, 10);
        assert_eq!(hard_drop_distance(&o, &board), 18);
        // I occupies row 1 of its 4x4 box.
        let i = Piece::at_spawn(PieceKind::I, 10);
        assert_eq!(hard_drop_distance(&i, &board), 18);
    }
}
