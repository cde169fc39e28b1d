//! Pieces module - tetromino shape catalog and rotation with wall kicks
//!
//! Each kind starts from a base matrix (1 or 2 rows). The remaining rotation
//! states are derived once, at compile time, with the clockwise transform
//! `rotated[c][R-1-r] = original[r][c]`, so four rotations always land back on
//! the base matrix. The O piece keeps a single state.

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to the piece anchor (x = column, y = row)
pub type MinoOffset = (i8, i8);

/// One rotation state of a piece: 4 mino offsets plus its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    pub cells: [MinoOffset; 4],
    pub width: u8,
    pub height: u8,
}

impl PieceShape {
    /// Rotate the matrix 90° clockwise.
    ///
    /// A cell at row `r`, column `c` of an `R x C` matrix moves to row `c`,
    /// column `R - 1 - r` of the resulting `C x R` matrix.
    pub const fn rotated_cw(&self) -> Self {
        let rows = self.height as i8;
        let mut cells = self.cells;
        let mut i = 0;
        while i < 4 {
            let (c, r) = self.cells[i];
            cells[i] = (rows - 1 - r, c);
            i += 1;
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }

    /// Expand into a row-major boolean matrix (`height` rows of `width` cells).
    pub fn matrix(&self) -> Vec<Vec<bool>> {
        let mut m = vec![vec![false; self.width as usize]; self.height as usize];
        for &(x, y) in &self.cells {
            m[y as usize][x as usize] = true;
        }
        m
    }
}

/// Build a shape from a base matrix given as a list of occupied (x, y) cells.
const fn base(cells: [MinoOffset; 4], width: u8, height: u8) -> PieceShape {
    PieceShape {
        cells,
        width,
        height,
    }
}

const fn rotations(spawn: PieceShape) -> [PieceShape; 4] {
    let east = spawn.rotated_cw();
    let south = east.rotated_cw();
    let west = south.rotated_cw();
    [spawn, east, south, west]
}

// [[1, 1, 1, 1]]
const I_BASE: PieceShape = base([(0, 0), (1, 0), (2, 0), (3, 0)], 4, 1);
// [[1, 1],
//  [1, 1]]
const O_BASE: PieceShape = base([(0, 0), (1, 0), (0, 1), (1, 1)], 2, 2);
// [[0, 1, 0],
//  [1, 1, 1]]
const T_BASE: PieceShape = base([(1, 0), (0, 1), (1, 1), (2, 1)], 3, 2);
// [[0, 1, 1],
//  [1, 1, 0]]
const S_BASE: PieceShape = base([(1, 0), (2, 0), (0, 1), (1, 1)], 3, 2);
// [[1, 1, 0],
//  [0, 1, 1]]
const Z_BASE: PieceShape = base([(0, 0), (1, 0), (1, 1), (2, 1)], 3, 2);
// [[1, 0, 0],
//  [1, 1, 1]]
const J_BASE: PieceShape = base([(0, 0), (0, 1), (1, 1), (2, 1)], 3, 2);
// [[0, 0, 1],
//  [1, 1, 1]]
const L_BASE: PieceShape = base([(2, 0), (0, 1), (1, 1), (2, 1)], 3, 2);

/// All rotation states, indexed by `[PieceKind::index()][Rotation::index()]`
static SHAPES: [[PieceShape; 4]; 7] = [
    rotations(I_BASE),
    [O_BASE; 4],
    rotations(T_BASE),
    rotations(S_BASE),
    rotations(Z_BASE),
    rotations(J_BASE),
    rotations(L_BASE),
];

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Get the base (spawn) shape for a piece kind
pub fn get_spawn_shape(kind: PieceKind) -> &'static PieceShape {
    get_shape(kind, Rotation::North)
}

/// Whether rotation requests change this kind at all
pub fn rotates(kind: PieceKind) -> bool {
    kind != PieceKind::O
}

/// Kicks tried after the in-place rotation fails, keyed by the rotation
/// state the piece is leaving.
static STATE_KICKS: [[(i8, i8); 3]; 4] = [
    [(-1, 0), (1, 0), (0, -1)],
    [(1, 0), (-1, 0), (0, 1)],
    [(1, 0), (-1, 0), (0, -1)],
    [(-1, 0), (1, 0), (0, 1)],
];

/// Horizontal-only kicks for pieces without a per-state table
static FALLBACK_KICKS: [(i8, i8); 4] = [(-1, 0), (1, 0), (-2, 0), (2, 0)];

/// Per-state kick table for a piece kind, if it has one.
///
/// I is deliberately left off the per-state table and always takes
/// [`FALLBACK_KICKS`] instead; O has no kicks at all.
pub fn state_kicks(kind: PieceKind, from: Rotation) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::I | PieceKind::O => None,
        _ => Some(&STATE_KICKS[from.index()]),
    }
}

/// Kick offsets to try, in order, after the in-place rotation fails
pub fn kick_offsets(kind: PieceKind, from: Rotation) -> &'static [(i8, i8)] {
    if !rotates(kind) {
        return &[];
    }
    state_kicks(kind, from).unwrap_or(&FALLBACK_KICKS)
}

/// Try to rotate a piece clockwise with wall kicks
///
/// `fits(shape, dx, dy)` reports whether `shape` is valid with the anchor
/// shifted by `(dx, dy)`. Returns the new rotation and the accepted offset,
/// or `None` if the piece does not rotate or every offset collides.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    fits: impl Fn(&PieceShape, i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    if !rotates(kind) {
        return None;
    }

    let new_rotation = rotation.rotate_cw();
    let new_shape = get_shape(kind, new_rotation);

    std::iter::once(&(0, 0))
        .chain(kick_offsets(kind, rotation))
        .find(|&&(dx, dy)| fits(new_shape, dx, dy))
        .map(|&offset| (new_rotation, offset))
}

/// Spawn anchor for new pieces (x, y): horizontal center, top row
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8 - 1, 0);
