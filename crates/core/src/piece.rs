//! Active piece instance: kind, rotation state and anchor position.
//!
//! The shape is always looked up from `(kind, rotation)` in the catalog and is
//! never stored on the piece itself.

use crate::pieces::{get_shape, PieceShape, SPAWN_POSITION};
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in its spawn state (rotation 0, top-center anchor)
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape for the current rotation
    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape()
            .cells
            .iter()
            .map(move |&(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
