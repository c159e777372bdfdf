//! GameView: maps `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::GameSnapshot;
use crate::core::{EndReason, SessionState};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, CELL_CLEARING, CELL_EMPTY, CELL_SYMBOLS, CELL_WALL};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_GAP: u16 = 2;
const PANEL_MIN_WIDTH: u16 = 10;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// How grid cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGlyphs {
    /// Colored solid blocks.
    Blocks,
    /// One character per cell from the `" ABCDEFG=#"` map.
    Letters,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    glyphs: CellGlyphs,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            glyphs: CellGlyphs::Blocks,
        }
    }
}

impl GameView {
    /// The plain letter rendering, one column per cell.
    pub fn letters() -> Self {
        Self {
            cell_w: 1,
            glyphs: CellGlyphs::Letters,
        }
    }

    pub fn with_cell_width(mut self, cell_w: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes. The field is anchored at the top left, the panel
    /// sits to its right.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        for y in 0..snap.height {
            for x in 0..snap.width {
                let value = snap.cell(x, y).unwrap_or(CELL_EMPTY);
                self.draw_grid_cell(fb, clamp_u16(x), clamp_u16(y), value);
            }
        }

        if snap.playable() {
            let kind = snap.active.kind;
            for (x, y) in snap.active.cells() {
                if x >= 0 && y >= 0 && (x as usize) < snap.width && (y as usize) < snap.height {
                    let (x, y) = (clamp_u16(x as usize), clamp_u16(y as usize));
                    self.draw_grid_cell(fb, x, y, kind.cell_value());
                }
            }
        }

        let field_w = self.field_width(snap);
        self.draw_side_panel(fb, snap, viewport, field_w.saturating_add(PANEL_GAP));

        if let SessionState::GameOver(reason) = snap.state {
            let text = match reason {
                EndReason::Blocked => "GAME OVER",
                EndReason::Quit => "BYE",
            };
            self.draw_overlay_text(fb, field_w, clamp_u16(snap.height), text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal size needed to show the field and the panel in full.
    pub fn preferred_viewport(&self, snap: &GameSnapshot) -> Viewport {
        Viewport::new(
            self.field_width(snap).saturating_add(PANEL_GAP + PANEL_MIN_WIDTH),
            clamp_u16(snap.height).max(8),
        )
    }

    /// Terminal columns taken by the field.
    fn field_width(&self, snap: &GameSnapshot) -> u16 {
        clamp_u16(snap.width).saturating_mul(self.cell_w)
    }

    fn draw_grid_cell(&self, fb: &mut FrameBuffer, x: u16, y: u16, value: u8) {
        let (ch, style) = match self.glyphs {
            CellGlyphs::Letters => (
                CELL_SYMBOLS.get(value as usize).copied().unwrap_or('?'),
                CellStyle::default(),
            ),
            CellGlyphs::Blocks => block_for(value),
        };
        fb.fill_rect(x.saturating_mul(self.cell_w), y, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("PIECES", snap.pieces),
            ("SPEED", snap.speed),
        ];
        let mut y = 0;
        for (name, n) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, field_w: u16, field_h: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = field_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, field_h / 2, text, style);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn block_for(value: u8) -> (char, CellStyle) {
    match value {
        CELL_EMPTY => (' ', CellStyle::new(FIELD_BG, FIELD_BG)),
        CELL_CLEARING => (
            '=',
            CellStyle::new(Rgb::new(255, 255, 255), FIELD_BG).bold(),
        ),
        CELL_WALL => ('▓', CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(0, 0, 0))),
        v => match PieceKind::from_cell(v) {
            Some(kind) => ('█', CellStyle::new(piece_color(kind), FIELD_BG)),
            None => ('?', CellStyle::default()),
        },
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
    }
}
