//! RNG module - piece generation
//!
//! The default generator draws each kind uniformly and independently over the
//! seven tetrominoes. There is no bag or anti-repeat rule, so streaks of the
//! same kind are possible. A scripted generator replays a fixed sequence and
//! is used for reproducible tests and tooling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

#[derive(Debug, Clone)]
enum Source {
    Uniform(StdRng),
    Scripted { kinds: Vec<PieceKind>, index: usize },
}

/// Produces the kind of each new piece
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    source: Source,
}

impl PieceGenerator {
    /// Uniform generator; `None` seeds from OS entropy
    pub fn uniform(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            source: Source::Uniform(rng),
        }
    }

    /// Replays `kinds` in order, wrapping around at the end.
    ///
    /// An empty script yields I pieces.
    pub fn scripted(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            source: Source::Scripted {
                kinds: kinds.into(),
                index: 0,
            },
        }
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self.source, Source::Scripted { .. })
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Uniform(rng) => PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())],
            Source::Scripted { kinds, index } => {
                if kinds.is_empty() {
                    return PieceKind::I;
                }
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::uniform(None)
    }
}
