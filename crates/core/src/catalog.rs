//! Piece catalog - the seven tetromino definitions
//!
//! Shapes are given in their spawn orientation. Square sizes differ per piece
//! (I is 4×4, O is 2×2, the rest are 3×3), which matters for spawn centering
//! and for how rotation moves the occupied cells inside the box.

use rand::Rng;

use crate::shape::Shape;
use crate::types::{Color, PieceKind};

/// Static definition of one tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TetrominoDef {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

/// All seven tetrominoes, in `PieceKind::ALL` order.
pub const CATALOG: [TetrominoDef; 7] = [
    TetrominoDef {
        kind: PieceKind::I,
        shape: Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: PieceKind::I.color(),
    },
    TetrominoDef {
        kind: PieceKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: PieceKind::O.color(),
    },
    TetrominoDef {
        kind: PieceKind::T,
        shape: Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        color: PieceKind::T.color(),
    },
    TetrominoDef {
        kind: PieceKind::S,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        color: PieceKind::S.color(),
    },
    TetrominoDef {
        kind: PieceKind::Z,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        color: PieceKind::Z.color(),
    },
    TetrominoDef {
        kind: PieceKind::J,
        shape: Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        color: PieceKind::J.color(),
    },
    TetrominoDef {
        kind: PieceKind::L,
        shape: Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        color: PieceKind::L.color(),
    },
];

/// The full set of named shape definitions
pub fn shapes_of() -> &'static [TetrominoDef; 7] {
    &CATALOG
}

/// Definition for a specific kind
pub fn definition(kind: PieceKind) -> &'static TetrominoDef {
    let idx = match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    };
    &CATALOG[idx]
}

/// Pick one of the seven definitions uniformly at random.
///
/// Every draw is independent; there is no bag or drought protection.
pub fn random_piece<R: Rng + ?Sized>(rng: &mut R) -> &'static TetrominoDef {
    &CATALOG[rng.random_range(0..CATALOG.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn catalog_order_matches_kind_order() {
        for (def, kind) in CATALOG.iter().zip(PieceKind::ALL) {
            assert_eq!(def.kind, kind);
            assert_eq!(definition(kind), def);
        }
    }

    #[test]
    fn every_piece_has_four_cells() {
        for def in shapes_of() {
            assert_eq!(def.shape.cell_count(), 4, "{:?}", def.kind);
        }
    }

    #[test]
    fn shape_sizes() {
        assert_eq!(definition(PieceKind::I).shape.size(), 4);
        assert_eq!(definition(PieceKind::O).shape.size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(definition(kind).shape.size(), 3);
        }
    }

    #[test]
    fn colors_match_kinds() {
        assert_eq!(definition(PieceKind::O).color, Color::from_hex(0xf0f000));
        assert_eq!(definition(PieceKind::L).color, Color::from_hex(0xf0a000));
    }

    #[test]
    fn random_piece_reaches_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [0u32; 7];
        for _ in 0..7000 {
            let def = random_piece(&mut rng);
            let idx = PieceKind::ALL.iter().position(|k| *k == def.kind).unwrap();
            seen[idx] += 1;
        }
        // Uniform draw: each kind should land near 1000.
        for count in seen {
            assert!((700..1300).contains(&count), "{:?}", seen);
        }
    }
}
