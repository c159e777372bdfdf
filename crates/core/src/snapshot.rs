//! Snapshot module - read-only views of a session for renderers

use crate::pieces::{PieceCells, Tetromino};
use crate::session::SessionState;
use crate::types::{PieceKind, Rotation, CELL_SYMBOLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Grid coordinates of the piece's filled cells.
    pub fn cells(&self) -> PieceCells {
        Tetromino::from(*self).cells()
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for Tetromino {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session between ticks.
///
/// `cells` is the grid alone; the active piece is never part of it and is
/// drawn on top by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major grid values, `width * height` long.
    pub cells: Vec<u8>,
    pub active: ActiveSnapshot,
    pub score: u32,
    pub level: u32,
    pub speed: u32,
    pub pieces: u32,
    /// Rows showing the clearing sentinel.
    pub pending_rows: Vec<usize>,
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Plain-text frame using the reference glyphs, active piece included.
    ///
    /// One line per row, no trailing newline after the last row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        let active = self.active.cells();
        let active_glyph = CELL_SYMBOLS[self.active.kind.cell_value() as usize];
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width {
                let covered = active
                    .iter()
                    .any(|&(ax, ay)| ax == x as i32 && ay == y as i32);
                let ch = if covered {
                    active_glyph
                } else {
                    let value = self.cell(x, y).unwrap_or(0) as usize;
                    CELL_SYMBOLS.get(value).copied().unwrap_or('?')
                };
                out.push(ch);
            }
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: ActiveSnapshot {
                kind: PieceKind::I,
                rotation: Rotation::North,
                x: 0,
                y: 0,
            },
            score: 0,
            level: 0,
            speed: 0,
            pieces: 0,
            pending_rows: Vec::new(),
            state: SessionState::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::session::{GameSession, SessionConfig};

    #[test]
    fn text_frame_overlays_active_piece() {
        let session = GameSession::new(
            SessionConfig::default(),
            ScriptedSource::repeat(PieceKind::O),
        )
        .unwrap();
        let text = session.snapshot().to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "#          #");
        assert_eq!(lines[1], "#      DD  #");
        assert_eq!(lines[2], "#      DD  #");
        assert_eq!(lines[17], "############");
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.cell(0, 0), None);
    }

    #[test]
    fn playable_follows_session_state() {
        let mut session = GameSession::new(
            SessionConfig::default(),
            ScriptedSource::repeat(PieceKind::T),
        )
        .unwrap();
        assert!(session.snapshot().playable());

        session.tick(crate::types::IntentSet::from(crate::types::Intent::Quit));
        assert!(!session.snapshot().playable());
    }
}
