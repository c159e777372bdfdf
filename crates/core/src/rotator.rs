//! Rotator - maps local piece coordinates to an index into the unrotated mask
//!
//! Shapes are stored once, at spawn orientation. Reading the mask through this
//! transform gives the 90°/180°/270° clockwise views without ever rotating the
//! mask itself. For every rotation the map is a permutation of `0..16`.

use crate::types::{ContractError, Rotation, SHAPE_SIZE};

/// Infallible transform for callers iterating the 4x4 footprint.
///
/// `px` and `py` must be in `0..4`.
#[inline(always)]
pub(crate) const fn transform(px: usize, py: usize, rotation: Rotation) -> usize {
    match rotation {
        Rotation::North => py * 4 + px,
        Rotation::East => 12 + py - px * 4,
        Rotation::South => 15 - py * 4 - px,
        Rotation::West => 3 - py + px * 4,
    }
}

/// Index into the unrotated 4x4 mask for local cell `(px, py)` at `rotation`.
///
/// ```
/// use console_tetris_core::rotator::index;
/// use console_tetris_core::types::Rotation;
///
/// assert_eq!(index(1, 2, Rotation::North), Ok(9));
/// assert_eq!(index(0, 0, Rotation::East), Ok(12));
/// assert_eq!(index(0, 0, Rotation::South), Ok(15));
/// assert_eq!(index(0, 0, Rotation::West), Ok(3));
/// assert!(index(4, 0, Rotation::North).is_err());
/// ```
pub fn index(px: u8, py: u8, rotation: Rotation) -> Result<usize, ContractError> {
    if px as usize >= SHAPE_SIZE || py as usize >= SHAPE_SIZE {
        return Err(ContractError::LocalCellOutOfRange { px, py });
    }
    Ok(transform(px as usize, py as usize, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_is_row_major_identity() {
        for py in 0..4u8 {
            for px in 0..4u8 {
                assert_eq!(
                    index(px, py, Rotation::North),
                    Ok(py as usize * 4 + px as usize)
                );
            }
        }
    }

    #[test]
    fn every_rotation_is_a_permutation() {
        for rotation in Rotation::ALL {
            let mut seen = [false; 16];
            for py in 0..4 {
                for px in 0..4 {
                    let i = transform(px, py, rotation);
                    assert!(i < 16);
                    assert!(!seen[i], "{:?} maps two cells onto {}", rotation, i);
                    seen[i] = true;
                }
            }
            assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn quarter_turn_moves_top_left_to_top_right() {
        // Clockwise: the mask's bottom-left corner (index 12) appears top-left,
        // and the mask's top-left corner (index 0) appears top-right.
        assert_eq!(transform(0, 0, Rotation::East), 12);
        assert_eq!(transform(3, 0, Rotation::East), 0);
    }

    #[test]
    fn rejects_cells_outside_footprint() {
        assert_eq!(
            index(0, 4, Rotation::South),
            Err(ContractError::LocalCellOutOfRange { px: 0, py: 4 })
        );
    }
}
