//! Terminal "game renderer" module.
//!
//! Snapshots go into a framebuffer ([`GameView`]); framebuffers go to the
//! terminal ([`TerminalRenderer`]). Only the renderer touches stdout.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{CellGlyphs, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
