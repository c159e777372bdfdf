//! Collision checks against the board.
//!
//! Only cells that land inside the grid buffer are tested. Cells above the top
//! edge always pass, so pieces can spawn and turn partly outside the visible
//! field; the walls stop everything else.

use crate::board::Board;
use crate::pieces::{is_filled, Tetromino};
use crate::types::{ContractError, PieceKind, Rotation, CELL_EMPTY, SHAPE_SIZE};

/// Whether `kind` at `rotation` can occupy the footprint anchored at (x, y).
pub fn fits(board: &Board, kind: PieceKind, rotation: Rotation, x: i32, y: i32) -> bool {
    for py in 0..SHAPE_SIZE {
        for px in 0..SHAPE_SIZE {
            if !is_filled(kind, rotation, px, py) {
                continue;
            }
            if let Some(cell) = board.get(x + px as i32, y + py as i32) {
                if cell != CELL_EMPTY {
                    return false;
                }
            }
        }
    }
    true
}

/// [`fits`] for an existing piece.
pub fn piece_fits(board: &Board, piece: &Tetromino) -> bool {
    fits(board, piece.kind, piece.rotation, piece.x, piece.y)
}

/// [`fits`] over raw piece type and rotation values.
///
/// ```
/// use console_tetris_core::{collision::fits_raw, Board};
///
/// let board = Board::new();
/// assert_eq!(fits_raw(&board, 3, 0, 6, 0), Ok(true));
/// assert!(fits_raw(&board, 7, 0, 6, 0).is_err());
/// assert!(fits_raw(&board, 0, 4, 6, 0).is_err());
/// ```
pub fn fits_raw(
    board: &Board,
    kind: u8,
    rotation: u8,
    x: i32,
    y: i32,
) -> Result<bool, ContractError> {
    let kind = PieceKind::try_from(kind)?;
    let rotation = Rotation::try_from(rotation)?;
    Ok(fits(board, kind, rotation, x, y))
}
