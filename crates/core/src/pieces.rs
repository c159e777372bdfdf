//! Pieces module - tetromino shape table and the active piece
//!
//! Each shape is a 4x4 mask at spawn orientation, written out the way it
//! appears on screen (`X` filled, `.` empty). Rotated views go through the
//! [`rotator`](crate::rotator).

use arrayvec::ArrayVec;

use crate::rotator::transform;
use crate::types::{PieceKind, Rotation, SHAPE_SIZE};

/// A 4x4 shape mask, row-major.
pub type ShapeMask = [bool; SHAPE_SIZE * SHAPE_SIZE];

/// Filled cells of one piece in some frame of reference.
pub type PieceCells = ArrayVec<(i32, i32), 4>;

const fn mask(rows: &[u8; 16]) -> ShapeMask {
    let mut out = [false; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = rows[i] == b'X';
        i += 1;
    }
    out
}

/// Shape table, indexed by piece type.
pub const SHAPES: [ShapeMask; 7] = [
    // I
    mask(b"..X...X...X...X."),
    // Z
    mask(b"..X..XX..X......"),
    // S
    mask(b".X...XX...X....."),
    // O
    mask(b".....XX..XX....."),
    // T
    mask(b"..X..XX...X....."),
    // L
    mask(b".X...X...XX....."),
    // J
    mask(b"..X...X..XX....."),
];

/// Unrotated mask for a piece kind.
pub fn shape(kind: PieceKind) -> &'static ShapeMask {
    &SHAPES[kind.index()]
}

/// Whether local cell `(px, py)` is filled for `kind` at `rotation`.
///
/// `px` and `py` must be in `0..4`.
#[inline(always)]
pub fn is_filled(kind: PieceKind, rotation: Rotation, px: usize, py: usize) -> bool {
    shape(kind)[transform(px, py, rotation)]
}

/// Local coordinates of the filled cells, row by row.
pub fn local_cells(kind: PieceKind, rotation: Rotation) -> PieceCells {
    let mut cells = PieceCells::new();
    for py in 0..SHAPE_SIZE {
        for px in 0..SHAPE_SIZE {
            if is_filled(kind, rotation, px, py) {
                cells.push((px as i32, py as i32));
            }
        }
    }
    cells
}

/// The falling piece: kind, rotation and the grid position of its 4x4
/// footprint's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Tetromino {
    /// A fresh piece at the spawn position of a field `field_width` wide:
    /// horizontally centered, top row, spawn orientation.
    pub fn spawn(kind: PieceKind, field_width: usize) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: (field_width / 2) as i32,
            y: 0,
        }
    }

    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// Grid coordinates of the filled cells.
    pub fn cells(&self) -> PieceCells {
        local_cells(self.kind, self.rotation)
            .into_iter()
            .map(|(px, py)| (self.x + px, self.y + py))
            .collect()
    }
}
