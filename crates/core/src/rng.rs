//! RNG module - where new pieces come from
//!
//! The session draws every new piece through [`PieceSource`]. The default
//! source picks uniformly from the catalog with a seedable `StdRng`, so the
//! same seed replays the same game. [`FixedPieces`] replays a scripted
//! sequence, which tests and demos use to force specific pieces.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::random_piece;
use crate::types::PieceKind;

/// Supplier of the next piece kind
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random pieces
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomPieces {
    /// Deterministic source: the same seed yields the same piece sequence
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Seed this source was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        random_piece(&mut self.rng).kind
    }
}

/// Cycles through a fixed list of kinds.
///
/// An empty list behaves like `[PieceKind::I]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl FixedPieces {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }

    /// Source that only ever yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for FixedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
