//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, usable from the core simulation, the
//! terminal view and the input layer alike.
//!
//! # Field Dimensions
//!
//! The default playfield is 12 columns by 18 rows, *including* the permanent
//! wall: one column on each side and one row at the bottom. That leaves a
//! 10x17 interior for play. There is no wall on top; pieces spawn in row 0.
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1..=7 | locked piece (piece type + 1) |
//! | 8 | row marked for clearing |
//! | 9 | boundary wall |
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Real-time tick cadence of the default driver |
//! | `BASE_SPEED` | 20 | Ticks per forced descent at difficulty 0 |
//! | `SPEED_FLOOR` | 10 | Ticks per forced descent never go below this |
//! | `PIECES_PER_SPEEDUP` | 10 | Locked pieces between difficulty increases |
//! | `LINE_CLEAR_PAUSE_MS` | 400 | Presentation pause before marked rows collapse |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{PieceKind, Rotation, Intent, IntentSet};
//!
//! let kind = PieceKind::try_from(3).unwrap();
//! assert_eq!(kind, PieceKind::O);
//! assert_eq!(kind.cell_value(), 4);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! let mut intents = IntentSet::empty();
//! intents.insert(Intent::Rotate);
//! assert!(intents.contains(Intent::Rotate));
//! assert!(!intents.contains(Intent::Quit));
//! ```

/// Default field width in cells, including both side walls.
pub const FIELD_WIDTH: usize = 12;

/// Default field height in cells, including the bottom wall.
pub const FIELD_HEIGHT: usize = 18;

/// Smallest field width that still fits every piece at the spawn column.
pub const MIN_FIELD_WIDTH: usize = 6;

/// Smallest field height that still fits every piece below the spawn row.
pub const MIN_FIELD_HEIGHT: usize = 5;

/// Largest accepted field width; keeps every rendered column inside a `u16`.
pub const MAX_FIELD_WIDTH: usize = 255;

/// Largest accepted field height.
pub const MAX_FIELD_HEIGHT: usize = 255;

/// Width and height of a piece's local footprint.
pub const SHAPE_SIZE: usize = 4;

pub const CELL_EMPTY: u8 = 0;

/// Interior cells of a completed row are overwritten with this value until the
/// row collapses.
pub const CELL_CLEARING: u8 = 8;

pub const CELL_WALL: u8 = 9;

/// Reference glyph for each cell value, indexed by the value itself.
pub const CELL_SYMBOLS: [char; 10] = [' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', '=', '#'];

/// Default tick cadence in milliseconds.
pub const TICK_MS: u64 = 50;

/// Ticks per forced descent at the start of a session.
pub const BASE_SPEED: u32 = 20;

/// Minimum ticks per forced descent.
pub const SPEED_FLOOR: u32 = 10;

/// Difficulty rises once every this many locked pieces.
pub const PIECES_PER_SPEEDUP: u32 = 10;

/// Default pause between marking rows and collapsing them.
pub const LINE_CLEAR_PAUSE_MS: u64 = 400;

/// Base score unit for line clears: `(1 << rows) * LINE_SCORE_UNIT`.
pub const LINE_SCORE_UNIT: u32 = 100;

/// Misuse of the raw-integer API surface.
///
/// These are precondition failures on the caller's side, never gameplay
/// events. Typed arguments ([`PieceKind`], [`Rotation`]) cannot produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("piece type {0} is out of range (expected 0..7)")]
    PieceTypeOutOfRange(u8),
    #[error("rotation {0} is out of range (expected 0..4)")]
    RotationOutOfRange(u8),
    #[error("local cell ({px}, {py}) is outside the 4x4 footprint")]
    LocalCellOutOfRange { px: u8, py: u8 },
    #[error(
        "field {width}x{height} is too small (minimum {min_w}x{min_h})",
        min_w = MIN_FIELD_WIDTH,
        min_h = MIN_FIELD_HEIGHT
    )]
    FieldTooSmall { width: usize, height: usize },
    #[error(
        "field {width}x{height} is too large (maximum {max_w}x{max_h})",
        max_w = MAX_FIELD_WIDTH,
        max_h = MAX_FIELD_HEIGHT
    )]
    FieldTooLarge { width: usize, height: usize },
    #[error("speed settings need 0 < floor <= base and a non-zero pieces-per-speedup (got base {base}, floor {floor}, per {per})")]
    InvalidSpeed { base: u32, floor: u32, per: u32 },
}

/// The seven tetromino piece kinds, in shape-table order.
///
/// The discriminant is the piece type used throughout the engine; a locked
/// cell stores `type + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I = 0,
    Z = 1,
    S = 2,
    O = 3,
    T = 4,
    L = 5,
    J = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Piece type in `0..7`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value written into the grid when this piece locks.
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`].
    ///
    /// ```
    /// use console_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_cell(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_cell(7), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_cell(0), None);
    /// assert_eq!(PieceKind::from_cell(9), None);
    /// ```
    pub fn from_cell(value: u8) -> Option<Self> {
        match value {
            1..=7 => Self::ALL.get(value as usize - 1).copied(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = ContractError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ContractError::PieceTypeOutOfRange(value))
    }
}

/// Rotation states, clockwise from the spawn orientation.
///
/// - **North**: 0°
/// - **East**: 90°
/// - **South**: 180°
/// - **West**: 270°
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use console_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state in `0..4`.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = ContractError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ContractError::RotationOutOfRange(value))
    }
}

/// A single player intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveDown,
    MoveRight,
    MoveLeft,
    /// Rotate 90° clockwise
    Rotate,
    Quit,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::MoveDown,
        Intent::MoveRight,
        Intent::MoveLeft,
        Intent::Rotate,
        Intent::Quit,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The intents supplied for one tick: at most one of each, possibly none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntentSet {
    bits: u8,
}

impl IntentSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, intent: Intent) {
        self.bits |= intent.bit();
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.insert(intent);
        self
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.bits & intent.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL.into_iter().filter(|i| self.contains(*i))
    }
}

impl From<Intent> for IntentSet {
    fn from(intent: Intent) -> Self {
        Self::empty().with(intent)
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = Self::empty();
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}
