//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s and collects
//! them into one [`crate::types::IntentSet`] per tick. Only key presses
//! count; repeats and releases are dropped, so terminals without release
//! events behave the same as those with them.

pub mod map;
pub mod poll;

pub use console_tetris_types as types;

pub use map::{intent_for_key, is_quit_key};
pub use poll::{EventSource, TerminalEvents, TerminalInput};
