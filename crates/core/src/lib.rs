//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to run a game without a terminal: the walled grid, the
//! seven tetrominoes, the rotation transform, collision checks, scoring and
//! the per-tick session state machine. Nothing here performs I/O; the only
//! outward signal is `tracing` events, which are free when no subscriber is
//! installed.
//!
//! # Module Structure
//!
//! - [`board`]: walled grid, locking, row completion and collapse
//! - [`collision`]: does a piece fit at a given position
//! - [`pieces`]: the shape table and the active [`Tetromino`]
//! - [`rotator`]: maps 4x4 local coordinates to shape indices per rotation
//! - [`rng`]: seeded and scripted piece sources
//! - [`scoring`]: line-clear points and descent speed
//! - [`session`]: [`GameSession`], one game from first spawn to game over
//! - [`snapshot`]: read-only views handed to renderers
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{GameSession, SessionState};
//! use console_tetris_core::types::{Intent, IntentSet};
//!
//! let mut game = GameSession::seeded(12345);
//! game.tick(IntentSet::from(Intent::MoveLeft));
//! game.tick(IntentSet::from(Intent::Rotate));
//! assert_eq!(game.state(), SessionState::Playing);
//!
//! game.tick(IntentSet::from(Intent::Quit));
//! assert!(game.is_over());
//! ```
//!
//! # Timing
//!
//! The session counts ticks, not milliseconds. The driver sleeps one tick
//! (50ms by default) between calls; a forced descent happens every `speed`
//! ticks, starting at 20 and shrinking by one every 10 locked pieces down
//! to 10.

pub mod board;
pub mod collision;
pub mod pieces;
pub mod rng;
pub mod rotator;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use console_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{fits, piece_fits};
pub use pieces::Tetromino;
pub use rng::{PieceSource, ScriptedSource, SimpleRng};
pub use scoring::line_clear_score;
pub use session::{EndReason, GameSession, SessionConfig, SessionState, TickOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
