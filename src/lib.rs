//! Console Tetris (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `console_tetris::{core,input,term,types}` and adds the
//! command line and logging setup used by the binary.

pub mod cli;
pub mod logging;

pub use console_tetris_core as core;
pub use console_tetris_input as input;
pub use console_tetris_term as term;
pub use console_tetris_types as types;
