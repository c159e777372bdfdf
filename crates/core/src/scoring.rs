//! Scoring and difficulty rules.

use crate::types::LINE_SCORE_UNIT;

/// Points for clearing `rows` rows with a single lock: `2^rows * 100`.
///
/// ```
/// use console_tetris_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 200);
/// assert_eq!(line_clear_score(4), 1600);
/// ```
pub fn line_clear_score(rows: usize) -> u32 {
    if rows == 0 {
        return 0;
    }
    1u32.checked_shl(rows as u32)
        .map_or(u32::MAX, |bonus| bonus.saturating_mul(LINE_SCORE_UNIT))
}

/// Descent interval after a lock that brought the piece count to `pieces`.
///
/// Every `pieces_per_speedup` pieces the interval shrinks by one tick, never
/// going below `floor`.
pub fn next_speed(speed: u32, pieces: u32, pieces_per_speedup: u32, floor: u32) -> u32 {
    if pieces_per_speedup > 0 && pieces % pieces_per_speedup == 0 && speed > floor {
        speed - 1
    } else {
        speed
    }
}

/// Difficulty level shown to the player.
pub fn difficulty_level(base_speed: u32, speed: u32) -> u32 {
    base_speed.saturating_sub(speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_scores() {
        assert_eq!(line_clear_score(1), 200);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 800);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_line_clear_score_saturates() {
        assert_eq!(line_clear_score(40), u32::MAX);
    }

    #[test]
    fn test_speed_only_changes_on_interval() {
        assert_eq!(next_speed(20, 9, 10, 10), 20);
        assert_eq!(next_speed(20, 10, 10, 10), 19);
        assert_eq!(next_speed(20, 11, 10, 10), 20);
        assert_eq!(next_speed(20, 20, 10, 10), 19);
    }

    #[test]
    fn test_speed_respects_floor() {
        assert_eq!(next_speed(11, 10, 10, 10), 10);
        assert_eq!(next_speed(10, 10, 10, 10), 10);
    }

    #[test]
    fn test_difficulty_level() {
        assert_eq!(difficulty_level(20, 20), 0);
        assert_eq!(difficulty_level(20, 14), 6);
    }
}
